//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using real SQLite files (not in-memory)
//! so migrations, constraints and WAL mode behave as in production.

#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;
use tunedeck_core::types::*;
use tunedeck_storage::SqlitePlaylistStore;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub store: SqlitePlaylistStore,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let store = tunedeck_storage::connect(&db_url)
            .await
            .expect("Failed to open test database");

        Self {
            store,
            _temp_dir: temp_dir,
        }
    }

    pub fn store(&self) -> &SqlitePlaylistStore {
        &self.store
    }

    pub fn pool(&self) -> &SqlitePool {
        self.store.pool()
    }
}

/// Test fixture: a catalog song with every field populated
pub fn test_song(id: &str, name: &str) -> Song {
    Song {
        id: SongId::new(id),
        name: name.to_string(),
        artists: Some("Test Artist".to_string()),
        image_url: Some(format!("https://i.scdn.co/image/{id}")),
        duration_ms: Some(180_000),
        preview_url: Some(format!("https://p.scdn.co/mp3-preview/{id}")),
    }
}

/// Test fixture: song IDs in play order
pub fn song_ids(playlist: &Playlist) -> Vec<&str> {
    playlist.songs.iter().map(|s| s.id.as_str()).collect()
}
