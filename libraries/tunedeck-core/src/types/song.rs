//! Song references copied out of the external catalog

use super::ids::SongId;
use serde::{Deserialize, Serialize};

/// Artwork used when a song arrives without an image
pub const DEFAULT_ARTWORK_URL: &str = "assets/default-song.png";

/// A catalog track copied into a playlist at insertion time
///
/// Fields are snapshots; nothing is refreshed from the catalog later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Song payload as submitted by a client for appending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSong {
    pub id: SongId,
    pub name: String,
    #[serde(default)]
    pub artists: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl NewSong {
    /// Minimal song with only an identifier and a display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SongId::new(id),
            name: name.into(),
            artists: None,
            image_url: None,
            duration_ms: None,
            preview_url: None,
        }
    }

    /// Turn the payload into a stored song, filling in the placeholder
    /// artwork when none (or an empty string) was supplied.
    pub fn into_song(self) -> Song {
        let image_url = self
            .image_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ARTWORK_URL.to_string());

        Song {
            id: self.id,
            name: self.name,
            artists: self.artists,
            image_url: Some(image_url),
            duration_ms: self.duration_ms,
            preview_url: self.preview_url,
        }
    }
}
