//! Storage trait for playlists

use crate::error::Result;
use crate::types::{
    CreatePlaylist, NewSong, Playlist, PlaylistId, PlaylistUpdate, Song, SongId, UserId,
};
use async_trait::async_trait;

/// Persistent collection of user playlists
///
/// Every operation stands alone: there is no locking across calls, so two
/// clients editing the same playlist race and the last writer wins.
/// Mutations on an unknown playlist fail with `CoreError::PlaylistNotFound`.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Create a playlist; rejects blank names with `CoreError::InvalidInput`
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// All playlists owned by `owner_id`, most recently updated first
    async fn get_user_playlists(&self, owner_id: UserId) -> Result<Vec<Playlist>>;

    /// Single playlist with its songs
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Overwrite the song list
    async fn replace_songs(&self, id: PlaylistId, songs: Vec<Song>) -> Result<Playlist>;

    /// Push a song to the end, filling in placeholder artwork if missing.
    /// Duplicate song identifiers are stored as-is.
    async fn append_song(&self, id: PlaylistId, song: NewSong) -> Result<Playlist>;

    /// Drop every song with `song_id`; unknown song IDs leave the list untouched
    async fn remove_song(&self, id: PlaylistId, song_id: SongId) -> Result<Playlist>;

    /// Change the playlist name, with the same validation as creation
    async fn rename_playlist(&self, id: PlaylistId, name: String) -> Result<Playlist>;

    /// Apply a name and song-list change together; either both land or neither does
    async fn update_playlist(&self, id: PlaylistId, update: PlaylistUpdate) -> Result<Playlist>;

    /// Delete the playlist and its songs
    async fn delete_playlist(&self, id: PlaylistId) -> Result<()>;
}
