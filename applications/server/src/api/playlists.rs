/// Playlists API routes
use crate::{error::Result, error::ServerError, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tunedeck_core::{
    CreatePlaylist, NewSong, Playlist, PlaylistId, PlaylistUpdate, Song, SongId, UserId,
};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: Option<String>,
    #[serde(default)]
    pub songs: Option<Vec<Song>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub songs: Option<Vec<Song>>,
    pub name: Option<String>,
}

/// Load a playlist the caller owns; anyone else's playlist is reported as missing
async fn load_owned(app_state: &AppState, id: &PlaylistId, user_id: &UserId) -> Result<Playlist> {
    app_state
        .store
        .get_playlist(id.clone())
        .await?
        .filter(|playlist| playlist.is_owned_by(user_id))
        .ok_or_else(|| ServerError::NotFound("Playlist not found".to_string()))
}

/// GET /api/music/playlists
/// Get all playlists owned by the authenticated user
pub async fn list_playlists(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Vec<Playlist>>> {
    let playlists = app_state
        .store
        .get_user_playlists(auth.user_id().clone())
        .await?;
    Ok(Json(playlists))
}

/// POST /api/music/playlists
/// Create a new playlist
pub async fn create_playlist(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Playlist>)> {
    let Json(req) = payload?;
    let name = req
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest("Playlist name is required".to_string()))?;

    let playlist = app_state
        .store
        .create_playlist(CreatePlaylist::new(name, auth.user_id().clone()).with_songs(req.songs.unwrap_or_default()))
        .await?;

    tracing::info!(
        playlist_id = %playlist.id,
        owner = %playlist.owner_id,
        "Playlist created"
    );
    app_state.notifier.notify_created(playlist.clone());

    Ok((StatusCode::CREATED, Json(playlist)))
}

/// GET /api/music/playlists/:id
/// Get playlist details with songs
pub async fn get_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Playlist>> {
    let playlist = load_owned(&app_state, &PlaylistId::new(id), auth.user_id()).await?;
    Ok(Json(playlist))
}

/// PUT /api/music/playlists/:id
/// Replace the song list and optionally rename, as one change
pub async fn update_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<UpdatePlaylistRequest>, JsonRejection>,
) -> Result<Json<Playlist>> {
    let Json(req) = payload?;
    let update = PlaylistUpdate {
        name: req.name,
        songs: req.songs,
    };
    if update.is_empty() {
        return Err(ServerError::BadRequest(
            "Either songs or name must be provided".to_string(),
        ));
    }

    let playlist_id = PlaylistId::new(id);
    load_owned(&app_state, &playlist_id, auth.user_id()).await?;

    let playlist = app_state.store.update_playlist(playlist_id, update).await?;
    app_state.notifier.notify_updated(playlist.clone());

    Ok(Json(playlist))
}

/// DELETE /api/music/playlists/:id
/// Delete a playlist
pub async fn delete_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Value>> {
    let playlist_id = PlaylistId::new(id);
    load_owned(&app_state, &playlist_id, auth.user_id()).await?;

    app_state.store.delete_playlist(playlist_id.clone()).await?;
    tracing::info!(playlist_id = %playlist_id, "Playlist deleted");

    Ok(Json(json!({ "message": "Playlist deleted" })))
}

/// POST /api/music/playlists/:id/songs
/// Append a song to the end of a playlist
pub async fn add_song_to_playlist(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    payload: std::result::Result<Json<NewSong>, JsonRejection>,
) -> Result<Json<Playlist>> {
    let Json(song) = payload?;
    if song.id.as_str().trim().is_empty() {
        return Err(ServerError::BadRequest("Song id is required".to_string()));
    }

    let playlist_id = PlaylistId::new(id);
    load_owned(&app_state, &playlist_id, auth.user_id()).await?;

    let playlist = app_state.store.append_song(playlist_id, song).await?;
    app_state.notifier.notify_updated(playlist.clone());

    Ok(Json(playlist))
}

/// DELETE /api/music/playlists/:id/songs/:song_id
/// Remove every occurrence of a song from a playlist
pub async fn remove_song_from_playlist(
    Path((id, song_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Playlist>> {
    let playlist_id = PlaylistId::new(id);
    load_owned(&app_state, &playlist_id, auth.user_id()).await?;

    let playlist = app_state
        .store
        .remove_song(playlist_id, SongId::new(song_id))
        .await?;
    app_state.notifier.notify_updated(playlist.clone());

    Ok(Json(playlist))
}
