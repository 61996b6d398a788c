//! Configuration and reshaped records returned to API clients.

use crate::upstream::{self, first_image, join_names};
use bytes::Bytes;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Catalog connection settings
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://api.spotify.com/v1`
    pub base_url: String,
    /// Market used for browse endpoints
    pub market: String,
    pub search_limit: u32,
    pub browse_limit: u32,
    /// Comma-separated seed artist IDs for recommendations
    pub seed_artists: String,
    /// Comma-separated seed genres for recommendations
    pub seed_genres: String,
    /// Hosts the preview relay may fetch from, subdomains included.
    /// Empty allows any host.
    pub preview_hosts: Vec<String>,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Whether the preview relay may contact `host`
    pub fn allows_preview_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.preview_hosts.is_empty()
            || self.preview_hosts.iter().any(|allowed| {
                let allowed = allowed.to_ascii_lowercase();
                host == allowed
                    || host
                        .strip_suffix(allowed.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.spotify.com/v1".to_string(),
            market: "US".to_string(),
            search_limit: 50,
            browse_limit: 10,
            seed_artists: "4NHQUGzhtTLFvgF5SZesLK".to_string(),
            seed_genres: "pop".to_string(),
            preview_hosts: vec!["p.scdn.co".to_string()],
            timeout: Duration::from_secs(30),
        }
    }
}

// =============================================================================
// Search
// =============================================================================

/// Search results, artists first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub artists: Vec<ArtistSummary>,
    pub tracks: Vec<TrackSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    /// Artist names joined with ", "
    pub artists: String,
    pub album: Option<String>,
    pub release_date: Option<String>,
    pub duration_ms: Option<u64>,
    pub preview_url: Option<String>,
    pub image_url: Option<String>,
}

impl From<upstream::Track> for TrackSummary {
    fn from(track: upstream::Track) -> Self {
        let artists = join_names(&track.artists);
        let (album, release_date, image_url) = match track.album {
            Some(album) => (
                Some(album.name),
                album.release_date,
                first_image(&album.images),
            ),
            None => (None, None, None),
        };

        Self {
            id: track.id,
            name: track.name,
            artists,
            album,
            release_date,
            duration_ms: track.duration_ms,
            preview_url: track.preview_url,
            image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub followers: u64,
    pub image_url: Option<String>,
}

impl From<upstream::Artist> for ArtistSummary {
    fn from(artist: upstream::Artist) -> Self {
        Self {
            image_url: first_image(&artist.images),
            followers: artist.followers.and_then(|f| f.total).unwrap_or(0),
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
        }
    }
}

impl From<upstream::SearchResponse> for SearchResults {
    fn from(response: upstream::SearchResponse) -> Self {
        Self {
            artists: response
                .artists
                .map(|page| page.into_items().map(ArtistSummary::from).collect())
                .unwrap_or_default(),
            tracks: response
                .tracks
                .map(|page| page.into_items().map(TrackSummary::from).collect())
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Track detail
// =============================================================================

/// Catalog image reference, passed through untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// Single track as shown on the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDetail {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: AlbumDetail,
    pub duration_ms: Option<u64>,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub name: String,
    pub release_date: Option<String>,
    pub images: Vec<Image>,
}

impl From<upstream::Track> for TrackDetail {
    fn from(track: upstream::Track) -> Self {
        let album = track.album.map_or_else(
            || AlbumDetail {
                name: String::new(),
                release_date: None,
                images: Vec::new(),
            },
            |album| AlbumDetail {
                name: album.name,
                release_date: album.release_date,
                images: album.images,
            },
        );

        Self {
            id: track.id,
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album,
            duration_ms: track.duration_ms,
            preview_url: track.preview_url,
        }
    }
}

// =============================================================================
// Browse
// =============================================================================

/// Album card used by the popular and new-release shelves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub id: String,
    pub name: String,
    pub artists: String,
    pub release_date: Option<String>,
    pub image_url: Option<String>,
}

impl From<upstream::Album> for AlbumSummary {
    fn from(album: upstream::Album) -> Self {
        Self {
            id: album.id.unwrap_or_default(),
            artists: join_names(&album.artists),
            image_url: first_image(&album.images),
            name: album.name,
            release_date: album.release_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub artists: String,
    pub album: Option<String>,
    pub image_url: Option<String>,
    pub preview_url: Option<String>,
}

impl From<upstream::Track> for Recommendation {
    fn from(track: upstream::Track) -> Self {
        let summary = TrackSummary::from(track);
        Self {
            id: summary.id,
            name: summary.name,
            artists: summary.artists,
            album: summary.album,
            image_url: summary.image_url,
            preview_url: summary.preview_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<upstream::PlaylistSimple> for FeaturedPlaylist {
    fn from(playlist: upstream::PlaylistSimple) -> Self {
        Self {
            image_url: first_image(&playlist.images),
            id: playlist.id,
            name: playlist.name,
            description: playlist.description,
        }
    }
}

// =============================================================================
// Preview
// =============================================================================

/// Raw audio bytes relayed from a preview URL
pub struct PreviewStream {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: BoxStream<'static, Result<Bytes, reqwest::Error>>,
}

impl fmt::Debug for PreviewStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewStream")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
