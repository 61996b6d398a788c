//! Raw catalog payloads (Spotify Web API shape).
//!
//! Only the fields the reshaped records need are declared; everything is
//! lenient because the catalog omits or nulls fields freely.

use crate::types::Image;
use serde::Deserialize;

/// Paged list; the catalog sometimes puts `null` entries in `items`
#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<Option<T>>,
}

impl<T> Paging<T> {
    pub fn into_items(self) -> impl Iterator<Item = T> {
        self.items.into_iter().flatten()
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
    pub artists: Option<Paging<Artist>>,
}

#[derive(Debug, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<Album>,
    pub duration_ms: Option<u64>,
    pub preview_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Album {
    pub id: Option<String>,
    pub name: String,
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct NewReleasesResponse {
    pub albums: Paging<Album>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedPlaylistsResponse {
    pub playlists: Paging<PlaylistSimple>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSimple {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Names joined the way the client displays them
pub fn join_names(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// First image, which the catalog orders largest first
pub fn first_image(images: &[Image]) -> Option<String> {
    images.first().map(|image| image.url.clone())
}
