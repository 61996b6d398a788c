//! Tunedeck Catalog
//!
//! Thin proxy over the external music catalog. Each operation makes one
//! authenticated upstream request and reshapes the answer into compact
//! records the web client renders directly.
//!
//! Upstream failures are surfaced as [`CatalogError`] with the upstream body
//! kept in [`CatalogError::details`] so callers can hand it back verbatim.

mod client;
mod credentials;
mod error;
mod types;
mod upstream;

pub use client::CatalogClient;
pub use credentials::{CredentialProvider, StaticToken};
pub use error::{CatalogError, Result};
pub use types::{
    AlbumDetail, AlbumSummary, ArtistSummary, CatalogConfig, FeaturedPlaylist, Image,
    PreviewStream, Recommendation, SearchResults, TrackDetail, TrackSummary,
};
