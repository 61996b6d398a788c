//! Catalog proxy client.

use crate::credentials::CredentialProvider;
use crate::error::{body_to_value, CatalogError, Result};
use crate::types::{
    AlbumSummary, CatalogConfig, FeaturedPlaylist, PreviewStream, Recommendation, SearchResults,
    TrackDetail,
};
use crate::upstream;
use futures_util::StreamExt;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Client for the external music catalog.
///
/// Every call attaches the bearer token from the configured
/// [`CredentialProvider`], issues exactly one upstream request and reshapes
/// the answer into the compact records in [`crate::types`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use tunedeck_catalog::{CatalogClient, CatalogConfig, StaticToken};
///
/// let client = CatalogClient::new(
///     CatalogConfig::default(),
///     Arc::new(StaticToken::new("token")),
/// )?;
/// let results = client.search("daft punk").await?;
/// println!("{} tracks", results.tracks.len());
/// ```
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    config: Arc<CatalogConfig>,
    credentials: Arc<dyn CredentialProvider>,
}

impl CatalogClient {
    /// Create a client for the given catalog.
    pub fn new(config: CatalogConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Tunedeck/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(CatalogConfig { base_url, ..config }),
            credentials,
        })
    }

    /// Normalized catalog base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Search tracks and artists matching a free-text query.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidInput("Query parameter is required".into()));
        }

        let limit = self.config.search_limit.to_string();
        let response: upstream::SearchResponse = self
            .get_json(
                "search",
                &[("q", query), ("type", "track,artist"), ("limit", limit.as_str())],
            )
            .await?;

        let results = SearchResults::from(response);
        debug!(
            query = %query,
            tracks = results.tracks.len(),
            artists = results.artists.len(),
            "Catalog search complete"
        );
        Ok(results)
    }

    /// Fetch a single track by catalog ID.
    pub async fn track(&self, id: &str) -> Result<TrackDetail> {
        let id = id.trim();
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CatalogError::InvalidInput(format!("Invalid track id: {:?}", id)));
        }

        let track: upstream::Track = self.get_json(&format!("tracks/{}", id), &[]).await?;
        Ok(TrackDetail::from(track))
    }

    /// First page of new-release albums, used as the "popular" shelf.
    pub async fn popular_albums(&self) -> Result<Vec<AlbumSummary>> {
        let limit = self.config.browse_limit.to_string();
        let response: upstream::NewReleasesResponse = self
            .get_json("browse/new-releases", &[("limit", limit.as_str()), ("offset", "0")])
            .await?;

        Ok(response
            .albums
            .into_items()
            .map(AlbumSummary::from)
            .collect())
    }

    /// New releases for the configured market.
    pub async fn new_releases(&self) -> Result<Vec<AlbumSummary>> {
        let limit = self.config.browse_limit.to_string();
        let response: upstream::NewReleasesResponse = self
            .get_json(
                "browse/new-releases",
                &[("limit", limit.as_str()), ("country", self.config.market.as_str())],
            )
            .await?;

        Ok(response
            .albums
            .into_items()
            .map(AlbumSummary::from)
            .collect())
    }

    /// Recommendations seeded from the configured artists and genres.
    pub async fn recommendations(&self) -> Result<Vec<Recommendation>> {
        let limit = self.config.browse_limit.to_string();
        let response: upstream::RecommendationsResponse = self
            .get_json(
                "recommendations",
                &[
                    ("seed_artists", self.config.seed_artists.as_str()),
                    ("seed_genres", self.config.seed_genres.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;

        Ok(response
            .tracks
            .into_iter()
            .map(Recommendation::from)
            .collect())
    }

    /// Editorially featured playlists for the configured market.
    pub async fn featured_playlists(&self) -> Result<Vec<FeaturedPlaylist>> {
        let limit = self.config.browse_limit.to_string();
        let response: upstream::FeaturedPlaylistsResponse = self
            .get_json(
                "browse/featured-playlists",
                &[("limit", limit.as_str()), ("country", self.config.market.as_str())],
            )
            .await?;

        Ok(response
            .playlists
            .into_items()
            .map(FeaturedPlaylist::from)
            .collect())
    }

    /// Open a preview audio URL and relay its bytes.
    ///
    /// Preview URLs are pre-signed by the catalog, so no credential is sent.
    /// Only hosts listed in [`CatalogConfig::preview_hosts`] are contacted.
    pub async fn preview(&self, raw_url: &str) -> Result<PreviewStream> {
        let raw_url = raw_url.trim();
        if raw_url.is_empty() {
            return Err(CatalogError::InvalidInput("Preview URL is required".into()));
        }

        let url = Url::parse(raw_url)
            .map_err(|e| CatalogError::InvalidInput(format!("Invalid preview URL: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CatalogError::InvalidInput(
                "Preview URL must use http or https".into(),
            ));
        }
        let allowed = url
            .host_str()
            .is_some_and(|host| self.config.allows_preview_host(host));
        if !allowed {
            warn!(url = %url, "Preview host rejected");
            return Err(CatalogError::InvalidInput(
                "Preview host is not allowed".into(),
            ));
        }

        debug!(url = %url, "Opening preview stream");
        let response = self.http.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Preview fetch failed");
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                details: body_to_value(body),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();

        Ok(PreviewStream {
            content_type,
            content_length,
            body: response.bytes_stream().boxed(),
        })
    }

    /// GET `{base}/{path}` with the bearer token and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let token = self.credentials.bearer_token().await?;
        let url = format!("{}/{}", self.config.base_url, path);
        debug!(url = %url, "Catalog request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Catalog returned an error");
            return Err(CatalogError::Upstream {
                status: status.as_u16(),
                details: body_to_value(text),
            });
        }

        serde_json::from_str(&text).map_err(|e| CatalogError::ParseError {
            message: format!("{} ({})", e, path),
            body: body_to_value(text),
        })
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
