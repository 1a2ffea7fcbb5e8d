use crate::infra::{AppState, Stores};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use civic_id::documents::{wallet_router, DocumentWalletService, StatusPolicy};
use civic_id::records::{listing_router, tracked_router, ListingService, ListingSettings};
use serde_json::json;
use std::sync::Arc;

/// Wallet and admin listing routes over the seeded stores.
pub(crate) fn api_routes(stores: Stores, policy: StatusPolicy, settings: ListingSettings) -> Router {
    let wallet = Arc::new(DocumentWalletService::new(stores.documents, policy, settings));

    wallet_router(wallet)
        .merge(tracked_router(
            "/api/v1/admin/complaints",
            Arc::new(ListingService::new(stores.complaints, settings)),
        ))
        .merge(tracked_router(
            "/api/v1/admin/applications",
            Arc::new(ListingService::new(stores.applications, settings)),
        ))
        .merge(tracked_router(
            "/api/v1/admin/accounts",
            Arc::new(ListingService::new(stores.accounts, settings)),
        ))
        .merge(listing_router(
            "/api/v1/admin/logs",
            Arc::new(ListingService::new(stores.logs, settings)),
        ))
}

pub(crate) fn with_operational_routes(router: Router) -> Router {
    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
