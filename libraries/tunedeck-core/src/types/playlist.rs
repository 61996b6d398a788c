//! Playlist types

use super::ids::{PlaylistId, UserId};
use super::song::Song;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// User-owned, ordered collection of songs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub owner_id: UserId,

    /// Play order is insertion order
    pub songs: Vec<Song>,

    pub created_at: String,
    pub updated_at: String,
}

impl Playlist {
    /// Whether `user_id` created this playlist
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

/// Data for creating a new playlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub owner_id: UserId,
    pub songs: Vec<Song>,
}

impl CreatePlaylist {
    /// Empty playlist request
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            name: name.into(),
            owner_id,
            songs: Vec::new(),
        }
    }

    /// Attach an initial song list
    #[must_use]
    pub fn with_songs(mut self, songs: Vec<Song>) -> Self {
        self.songs = songs;
        self
    }

    /// Reject requests a store must not persist
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Partial edit applied to a playlist in one step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistUpdate {
    pub name: Option<String>,
    pub songs: Option<Vec<Song>>,
}

impl PlaylistUpdate {
    /// True when neither field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.songs.is_none()
    }

    /// Reject a blank replacement name
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => validate_name(name),
            None => Ok(()),
        }
    }
}

/// Playlist names must contain something other than whitespace
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CoreError::invalid_input("Playlist name is required"));
    }
    Ok(())
}
