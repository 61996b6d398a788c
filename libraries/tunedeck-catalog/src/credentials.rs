//! Bearer credentials for catalog requests.

use crate::error::{CatalogError, Result};
use async_trait::async_trait;

/// Supplies the bearer token attached to every catalog request.
///
/// Token issuing and refresh live outside this crate; implementations only
/// need to hand back something currently valid.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<String>;
}

/// Fixed token read from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Provider that always reports a missing credential
    pub fn missing() -> Self {
        Self { token: None }
    }

    pub fn from_option(token: Option<String>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn bearer_token(&self) -> Result<String> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(CatalogError::MissingCredential)
    }
}
