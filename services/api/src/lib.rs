mod cli;
mod demo;
mod fixtures;
mod infra;
mod routes;
mod server;

use civic_id::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
