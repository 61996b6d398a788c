//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use tunedeck_catalog::{CatalogClient, CatalogConfig, StaticToken};
use tunedeck_core::UserId;
use tunedeck_notify::NotifierRegistry;
use tunedeck_server::{create_router, AppState, AuthService};
use wiremock::MockServer;

pub const TEST_SECRET: &str = "test-secret-key";
pub const CATALOG_TOKEN: &str = "catalog-token";

/// Router wired to a temp-file database and a mock catalog
pub struct TestApp {
    pub router: Router,
    pub catalog: MockServer,
    pub notifier: Arc<NotifierRegistry>,
    auth_service: Arc<AuthService>,
    _db_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_catalog_token(Some(CATALOG_TOKEN.to_string())).await
    }

    pub async fn with_catalog_token(token: Option<String>) -> Self {
        let db_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", db_dir.path().join("test.db").display());
        let store = tunedeck_storage::connect(&db_url).await.unwrap();

        let catalog_server = MockServer::start().await;
        let catalog_config = CatalogConfig {
            preview_hosts: vec!["127.0.0.1".to_string()],
            ..CatalogConfig::new(catalog_server.uri())
        };
        let catalog = CatalogClient::new(
            catalog_config,
            Arc::new(StaticToken::from_option(token)),
        )
        .unwrap();

        let notifier = Arc::new(NotifierRegistry::new());
        let auth_service = Arc::new(AuthService::new(TEST_SECRET.to_string(), 1));

        let app_state = AppState::new(
            Arc::new(store),
            Arc::new(catalog),
            Arc::clone(&notifier),
            Arc::clone(&auth_service),
        );

        Self {
            router: create_router(app_state),
            catalog: catalog_server,
            notifier,
            auth_service,
            _db_dir: db_dir,
        }
    }

    pub fn token_for(&self, user_id: &str) -> String {
        self.auth_service
            .create_access_token(&UserId::new(user_id))
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Authenticated request with an optional JSON body
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        user_id: &str,
        body: Option<Value>,
    ) -> Response<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token_for(user_id)));

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Test fixtures
pub mod fixtures {
    use serde_json::{json, Value};

    pub const ALICE: &str = "user-alice";
    pub const BOB: &str = "user-bob";

    pub fn song(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "imageUrl": format!("https://i.example.com/{}.jpg", id),
            "durationMs": 180000,
            "previewUrl": null
        })
    }
}
