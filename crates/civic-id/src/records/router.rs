use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::entities::{RecordId, Tracked};
use super::listing::{ListingError, ListingService, PageRequest};
use super::query::{FieldFilter, InvalidFilter, RecordQuery, Searchable};
use super::workflow::StatusWorkflow;
use crate::repository::{Keyed, Repository, RepositoryError};

/// Query string accepted by every listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListingParams {
    pub fn record_query<S, C>(&self) -> Result<RecordQuery<S, C>, InvalidFilter>
    where
        S: DeserializeOwned,
        C: DeserializeOwned,
    {
        Ok(RecordQuery {
            search_term: self.search.clone().unwrap_or_default(),
            status: FieldFilter::parse_label(self.status.as_deref())?,
            category: FieldFilter::parse_label(self.category.as_deref())?,
            owner_id: FieldFilter::owner(self.owner.as_deref()),
        })
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate<S> {
    pub status: S,
}

/// Read-only listing routes: `GET {base}` and `GET {base}/:id`.
pub fn listing_router<T, R>(base_path: &str, service: Arc<ListingService<T, R>>) -> Router
where
    T: Searchable + Keyed<Key = RecordId> + Clone + Serialize + Send + Sync + 'static,
    T::Status: Serialize + DeserializeOwned + Send,
    T::Category: DeserializeOwned + Send,
    R: Repository<T> + 'static,
{
    Router::new()
        .route(base_path, get(list_handler::<T, R>))
        .route(&format!("{base_path}/:record_id"), get(fetch_handler::<T, R>))
        .with_state(service)
}

/// Listing routes plus `PATCH {base}/:id/status` for workflow-tracked records.
pub fn tracked_router<T, R>(base_path: &str, service: Arc<ListingService<T, R>>) -> Router
where
    T: Tracked + Clone + Serialize + Send + Sync + 'static,
    T::Status: StatusWorkflow + Serialize + DeserializeOwned + Send,
    T::Category: DeserializeOwned + Send,
    R: Repository<T> + 'static,
{
    let status_route = Router::new()
        .route(
            &format!("{base_path}/:record_id/status"),
            patch(status_handler::<T, R>),
        )
        .with_state(service.clone());

    listing_router(base_path, service).merge(status_route)
}

pub(crate) async fn list_handler<T, R>(
    State(service): State<Arc<ListingService<T, R>>>,
    Query(params): Query<ListingParams>,
) -> Response
where
    T: Searchable + Keyed + Clone + Serialize + Send + Sync + 'static,
    T::Status: Serialize + DeserializeOwned,
    T::Category: DeserializeOwned,
    R: Repository<T> + 'static,
{
    let query = match params.record_query::<T::Status, T::Category>() {
        Ok(query) => query,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.to_string()),
    };

    match service.list(&query, params.page_request()) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(err) => listing_error_response(err),
    }
}

pub(crate) async fn fetch_handler<T, R>(
    State(service): State<Arc<ListingService<T, R>>>,
    Path(record_id): Path<String>,
) -> Response
where
    T: Searchable + Keyed<Key = RecordId> + Clone + Serialize + Send + Sync + 'static,
    R: Repository<T> + 'static,
{
    match service.get(&RecordId(record_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => listing_error_response(err),
    }
}

pub(crate) async fn status_handler<T, R>(
    State(service): State<Arc<ListingService<T, R>>>,
    Path(record_id): Path<String>,
    Json(update): Json<StatusUpdate<T::Status>>,
) -> Response
where
    T: Tracked + Clone + Serialize + Send + Sync + 'static,
    T::Status: StatusWorkflow + DeserializeOwned,
    R: Repository<T> + 'static,
{
    match service.transition_status(&RecordId(record_id), update.status) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => listing_error_response(err),
    }
}

fn listing_error_response(err: ListingError) -> Response {
    let status = match &err {
        ListingError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ListingError::Repository(RepositoryError::Conflict) | ListingError::Transition(_) => {
            StatusCode::CONFLICT
        }
        ListingError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    error_response(status, err.to_string())
}

pub(crate) fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
