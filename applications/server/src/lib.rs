//! Tunedeck Server Library
//!
//! Music discovery and playlist API: proxies the external catalog, stores
//! user playlists and pushes playlist changes to connected listeners.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

/// Build the full application router
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    // Public routes (no auth required)
    let public_music = Router::new()
        .route("/popular", get(api::music::popular))
        .route("/preview", get(api::music::preview));

    // Protected routes (auth required)
    let protected_music = Router::new()
        // Catalog
        .route("/search", get(api::music::search))
        .route("/track/:id", get(api::music::get_track))
        .route("/recommendations", get(api::music::recommendations))
        .route("/new-releases", get(api::music::new_releases))
        .route("/featured-playlists", get(api::music::featured_playlists))
        // Playlists
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route("/playlists/events", get(api::events::playlist_events))
        .route(
            "/playlists/:id",
            get(api::playlists::get_playlist)
                .put(api::playlists::update_playlist)
                .delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs",
            post(api::playlists::add_song_to_playlist),
        )
        .route(
            "/playlists/:id/songs/:song_id",
            delete(api::playlists::remove_song_from_playlist),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .nest("/music", public_music.merge(protected_music));

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
