//! Tunedeck Storage
//!
//! `SQLite` persistence for user playlists.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: the `playlists` module owns its queries and logic
//! - **Snapshots**: songs are stored as copies of the catalog data at insertion time
//! - **No cross-call isolation**: each operation is one transaction, last writer wins
//!
//! # Example
//!
//! ```rust,no_run
//! use tunedeck_core::{CreatePlaylist, PlaylistStore, UserId};
//! use tunedeck_storage::{create_pool, run_migrations, SqlitePlaylistStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://tunedeck.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqlitePlaylistStore::new(pool);
//! let playlist = store
//!     .create_playlist(CreatePlaylist::new("Focus", UserId::new("user-1")))
//!     .await?;
//! println!("created {}", playlist.id);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod playlists;

pub use context::SqlitePlaylistStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup so the schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://tunedeck.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    // SQLite creates the file but not the directories leading to it
    if let Some(parent) = options.get_filename().parent() {
        let missing = !parent.as_os_str().is_empty()
            && !tokio::fs::try_exists(parent).await.unwrap_or(false);
        if missing {
            tracing::info!(dir = %parent.display(), "Creating database directory");
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(sqlx::Error::Io)?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}

/// Create a pool, apply migrations and wrap it in a store
pub async fn connect(database_url: &str) -> Result<SqlitePlaylistStore, StorageError> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(SqlitePlaylistStore::new(pool))
}
