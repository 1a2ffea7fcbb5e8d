use crate::config::ConfigError;
use crate::documents::WalletError;
use crate::records::{ImportError, InvalidFilter, ListingError};
use crate::repository::RepositoryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(ImportError),
    Filter(InvalidFilter),
    Wallet(WalletError),
    Listing(ListingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "seed import error: {}", err),
            AppError::Filter(err) => write!(f, "invalid filter: {}", err),
            AppError::Wallet(err) => write!(f, "wallet error: {}", err),
            AppError::Listing(err) => write!(f, "listing error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Filter(err) => Some(err),
            AppError::Wallet(err) => Some(err),
            AppError::Listing(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Import(_) | AppError::Filter(_) => StatusCode::BAD_REQUEST,
            AppError::Wallet(WalletError::NotFound(_))
            | AppError::Listing(ListingError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Wallet(WalletError::ActionRejected { .. }) => StatusCode::FORBIDDEN,
            AppError::Wallet(WalletError::ActionDisabled { .. })
            | AppError::Wallet(WalletError::ActionUnavailable { .. })
            | AppError::Listing(ListingError::Transition(_)) => StatusCode::CONFLICT,
            AppError::Wallet(_)
            | AppError::Listing(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<InvalidFilter> for AppError {
    fn from(value: InvalidFilter) -> Self {
        Self::Filter(value)
    }
}

impl From<WalletError> for AppError {
    fn from(value: WalletError) -> Self {
        Self::Wallet(value)
    }
}

impl From<ListingError> for AppError {
    fn from(value: ListingError) -> Self {
        Self::Listing(value)
    }
}
