/// Catalog proxy API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use tunedeck_catalog::{AlbumSummary, FeaturedPlaylist, Recommendation, SearchResults, TrackDetail};

const DEFAULT_PREVIEW_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub url: Option<String>,
}

/// GET /api/music/search?query=
pub async fn search(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Query parameter is required".to_string()))?;

    let results = app_state.catalog.search(&query).await?;
    Ok(Json(results))
}

/// GET /api/music/track/:id
pub async fn get_track(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<TrackDetail>> {
    if id.trim().is_empty() {
        return Err(ServerError::BadRequest("Track id is required".to_string()));
    }

    let track = app_state.catalog.track(&id).await?;
    Ok(Json(track))
}

/// GET /api/music/popular
pub async fn popular(State(app_state): State<AppState>) -> Result<Json<Vec<AlbumSummary>>> {
    let albums = app_state.catalog.popular_albums().await?;
    Ok(Json(albums))
}

/// GET /api/music/recommendations
pub async fn recommendations(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<Recommendation>>> {
    let recommendations = app_state.catalog.recommendations().await?;
    Ok(Json(recommendations))
}

/// GET /api/music/new-releases
pub async fn new_releases(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<AlbumSummary>>> {
    let releases = app_state.catalog.new_releases().await?;
    Ok(Json(releases))
}

/// GET /api/music/featured-playlists
pub async fn featured_playlists(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<FeaturedPlaylist>>> {
    let playlists = app_state.catalog.featured_playlists().await?;
    Ok(Json(playlists))
}

/// GET /api/music/preview?url=
/// Relays preview audio so the browser never talks to the catalog CDN directly
pub async fn preview(
    State(app_state): State<AppState>,
    Query(params): Query<PreviewQuery>,
) -> Result<Response> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Preview URL is required".to_string()))?;

    let preview = app_state.catalog.preview(&url).await?;

    let content_type = preview
        .content_type
        .unwrap_or_else(|| DEFAULT_PREVIEW_CONTENT_TYPE.to_string());

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(length) = preview.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(Body::from_stream(preview.body))
        .map_err(|e| ServerError::Internal(format!("Failed to build preview response: {}", e)))
}
