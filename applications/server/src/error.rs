/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tunedeck_catalog::CatalogError;
use tunedeck_core::CoreError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(#[from] CoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl From<tunedeck_storage::StorageError> for ServerError {
    fn from(err: tunedeck_storage::StorageError) -> Self {
        ServerError::Storage(err.into())
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message, details): (StatusCode, String, Option<Value>) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ServerError::Storage(CoreError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg, None)
            }
            ServerError::Storage(CoreError::PlaylistNotFound(_)) => (
                StatusCode::NOT_FOUND,
                "Playlist not found".to_string(),
                None,
            ),
            ServerError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                    None,
                )
            }
            ServerError::Catalog(CatalogError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg, None)
            }
            ServerError::Catalog(ref e) => {
                tracing::error!(
                    upstream_status = ?e.upstream_status(),
                    "Catalog error: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch music data".to_string(),
                    Some(e.details()),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                    None,
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string(), None)
            }
        };

        let body = match details {
            Some(details) => json!({ "error": error_message, "details": details }),
            None => json!({ "error": error_message }),
        };

        (status, Json(body)).into_response()
    }
}
