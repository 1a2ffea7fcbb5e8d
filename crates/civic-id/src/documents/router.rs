use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DocumentId, DocumentRecord, ViewMode};
use super::service::{DocumentWalletService, WalletError};
use crate::records::router::error_response;
use crate::records::{FieldFilter, PageRequest, RecordQuery};
use crate::repository::{Repository, RepositoryError};

/// Query string shared by the wallet endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletParams {
    pub holder: Option<String>,
    #[serde(default)]
    pub mode: ViewMode,
    pub today: Option<NaiveDate>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl WalletParams {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Router builder exposing the citizen document wallet.
pub fn wallet_router<R>(service: Arc<DocumentWalletService<R>>) -> Router
where
    R: Repository<DocumentRecord> + 'static,
{
    Router::new()
        .route("/api/v1/wallet/documents", get(list_handler::<R>))
        .route(
            "/api/v1/wallet/documents/:document_id",
            get(view_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/wallet/documents/:document_id/renew",
            post(renew_handler::<R>),
        )
        .route(
            "/api/v1/wallet/documents/:document_id/print",
            post(print_handler::<R>),
        )
        .route("/api/v1/wallet/summary", get(summary_handler::<R>))
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<DocumentWalletService<R>>>,
    Query(params): Query<WalletParams>,
) -> Response
where
    R: Repository<DocumentRecord> + 'static,
{
    let status = FieldFilter::parse_label(params.status.as_deref());
    let category = FieldFilter::parse_label(params.category.as_deref());
    let (status, category) = match (status, category) {
        (Ok(status), Ok(category)) => (status, category),
        (Err(err), _) | (_, Err(err)) => {
            return error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
    };

    let query = RecordQuery {
        search_term: params.search.clone().unwrap_or_default(),
        status,
        category,
        owner_id: FieldFilter::owner(params.holder.as_deref()),
    };
    let request = PageRequest {
        page: params.page,
        page_size: params.page_size,
    };

    match service.list(&query, request, params.mode, params.today()) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => wallet_error_response(err),
    }
}

pub(crate) async fn view_handler<R>(
    State(service): State<Arc<DocumentWalletService<R>>>,
    Path(document_id): Path<String>,
    Query(params): Query<WalletParams>,
) -> Response
where
    R: Repository<DocumentRecord> + 'static,
{
    let id = DocumentId(document_id);
    match service.view(&id, params.mode, params.today()) {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(err) => wallet_error_response(err),
    }
}

pub(crate) async fn renew_handler<R>(
    State(service): State<Arc<DocumentWalletService<R>>>,
    Path(document_id): Path<String>,
    Query(params): Query<WalletParams>,
) -> Response
where
    R: Repository<DocumentRecord> + 'static,
{
    let id = DocumentId(document_id);
    match service.renew(&id, params.mode, params.today()) {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(err) => wallet_error_response(err),
    }
}

pub(crate) async fn print_handler<R>(
    State(service): State<Arc<DocumentWalletService<R>>>,
    Path(document_id): Path<String>,
    Query(params): Query<WalletParams>,
) -> Response
where
    R: Repository<DocumentRecord> + 'static,
{
    let id = DocumentId(document_id);
    match service.print(&id, params.mode, params.today()) {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(err) => wallet_error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<DocumentWalletService<R>>>,
    Path(document_id): Path<String>,
    Query(params): Query<WalletParams>,
) -> Response
where
    R: Repository<DocumentRecord> + 'static,
{
    let id = DocumentId(document_id);
    match service.delete(&id, params.mode) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => wallet_error_response(err),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<DocumentWalletService<R>>>,
    Query(params): Query<WalletParams>,
) -> Response
where
    R: Repository<DocumentRecord> + 'static,
{
    match service.summary(params.holder.as_deref(), params.today()) {
        Ok(counts) => {
            let total: usize = counts.values().sum();
            let payload = json!({ "total": total, "status_counts": counts });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => wallet_error_response(err),
    }
}

fn wallet_error_response(err: WalletError) -> Response {
    match err {
        WalletError::ActionRejected { action, dialog } => {
            let payload = json!({
                "error": "action rejected",
                "action": action,
                "dialog": dialog,
            });
            (StatusCode::FORBIDDEN, Json(payload)).into_response()
        }
        WalletError::NotFound(_) | WalletError::Repository(RepositoryError::NotFound) => {
            error_response(StatusCode::NOT_FOUND, err.to_string())
        }
        WalletError::ActionDisabled { .. } | WalletError::ActionUnavailable { .. } => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        WalletError::RenewalOutOfRange(_)
        | WalletError::Repository(RepositoryError::Conflict)
        | WalletError::Repository(RepositoryError::Unavailable(_)) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
