//! Tunedeck Core
//!
//! Domain types, the playlist storage trait, and error handling shared by
//! every Tunedeck crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `Song`, `NewSong` and their identifiers
//! - **Core Traits**: `PlaylistStore`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tunedeck_core::types::{CreatePlaylist, NewSong, UserId, DEFAULT_ARTWORK_URL};
//!
//! let owner = UserId::new("user-1");
//! let request = CreatePlaylist::new("Road trip", owner);
//! assert!(request.validate().is_ok());
//!
//! let song = NewSong::new("4uLU6hMCjMI75M1A2tKUQC", "Never Gonna Give You Up").into_song();
//! assert_eq!(song.image_url.as_deref(), Some(DEFAULT_ARTWORK_URL));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

pub use error::{CoreError, Result};
pub use store::PlaylistStore;

pub use types::{
    CreatePlaylist, NewSong, Playlist, PlaylistId, PlaylistUpdate, Song, SongId, UserId,
    DEFAULT_ARTWORK_URL,
};
