use crate::playlists;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tunedeck_core::{error::Result, store::PlaylistStore, types::*};

/// Playlist store backed by `SQLite`
#[derive(Clone)]
pub struct SqlitePlaylistStore {
    pool: SqlitePool,
}

impl SqlitePlaylistStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaylistStore for SqlitePlaylistStore {
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn get_user_playlists(&self, owner_id: UserId) -> Result<Vec<Playlist>> {
        playlists::get_user_playlists(&self.pool, owner_id).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn replace_songs(&self, id: PlaylistId, songs: Vec<Song>) -> Result<Playlist> {
        playlists::replace_songs(&self.pool, id, songs).await
    }

    async fn append_song(&self, id: PlaylistId, song: NewSong) -> Result<Playlist> {
        playlists::append_song(&self.pool, id, song).await
    }

    async fn remove_song(&self, id: PlaylistId, song_id: SongId) -> Result<Playlist> {
        playlists::remove_song(&self.pool, id, song_id).await
    }

    async fn rename_playlist(&self, id: PlaylistId, name: String) -> Result<Playlist> {
        playlists::rename(&self.pool, id, name).await
    }

    async fn update_playlist(&self, id: PlaylistId, update: PlaylistUpdate) -> Result<Playlist> {
        playlists::update(&self.pool, id, update).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, id).await
    }
}
