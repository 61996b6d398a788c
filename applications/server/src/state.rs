/// Shared application state
use crate::services::AuthService;
use std::sync::Arc;
use tunedeck_catalog::CatalogClient;
use tunedeck_core::PlaylistStore;
use tunedeck_notify::NotifierRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlaylistStore>,
    pub catalog: Arc<CatalogClient>,
    pub notifier: Arc<NotifierRegistry>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PlaylistStore>,
        catalog: Arc<CatalogClient>,
        notifier: Arc<NotifierRegistry>,
        auth_service: Arc<AuthService>,
    ) -> Self {
        Self {
            store,
            catalog,
            notifier,
            auth_service,
        }
    }
}
