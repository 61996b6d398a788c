//! Error types for the catalog client.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while talking to the external catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog answered with a non-success status
    #[error("Catalog returned {status}")]
    Upstream {
        status: u16,
        /// Upstream body, parsed as JSON when possible
        details: Value,
    },

    /// No bearer credential is available
    #[error("Catalog credential is not configured")]
    MissingCredential,

    /// Credential provider failed
    #[error("Failed to obtain catalog credential: {0}")]
    Credential(String),

    /// Caller supplied something unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid base or preview URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse catalog response
    #[error("Failed to parse response: {message}")]
    ParseError { message: String, body: Value },
}

impl CatalogError {
    /// Diagnostic payload to hand back to API clients
    pub fn details(&self) -> Value {
        match self {
            CatalogError::Upstream { details, .. } => details.clone(),
            CatalogError::ParseError { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// Upstream status code, when the catalog answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            CatalogError::Upstream { status, .. } => Some(*status),
            CatalogError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the caller (not the catalog) is at fault
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CatalogError::InvalidInput(_))
    }
}

/// Interpret a raw body as JSON, falling back to the plain text
pub(crate) fn body_to_value(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
