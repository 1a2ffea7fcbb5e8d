use crate::demo::{run_admin, run_demo, run_wallet, AdminArgs, DemoArgs, WalletArgs};
use crate::server;
use civic_id::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Civic ID",
    about = "Serve and inspect the citizen document wallet and admin record listings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print a holder's document wallet with derived statuses and permitted actions
    Wallet(WalletArgs),
    /// Filter and page through an admin collection
    Admin(AdminArgs),
    /// Walk through status derivation, read-only rejection and renewal end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Wallet(args) => run_wallet(args),
        Command::Admin(args) => run_admin(args),
        Command::Demo(args) => run_demo(args),
    }
}
