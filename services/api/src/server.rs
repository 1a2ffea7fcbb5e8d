use crate::cli::ServeArgs;
use crate::infra::{AppState, Stores};
use crate::routes::{api_routes, with_operational_routes};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use civic_id::config::AppConfig;
use civic_id::documents::StatusPolicy;
use civic_id::error::AppError;
use civic_id::records::ListingSettings;
use civic_id::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = Stores::load(config.seed_dir.as_deref())?;
    let policy = StatusPolicy::new(config.wallet.expiring_soon_days);
    let settings = ListingSettings::from(&config.listing);

    let app = with_operational_routes(api_routes(stores, policy, settings))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        expiring_soon_days = policy.window_days(),
        "civic id service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
