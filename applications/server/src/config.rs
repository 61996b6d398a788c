/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tunedeck_catalog::CatalogConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    /// Bearer token for the catalog; requests fail with a 500 while unset
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_market")]
    pub market: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_seed_artists")]
    pub seed_artists: String,

    #[serde(default = "default_seed_genres")]
    pub seed_genres: String,

    /// Hosts the preview relay may fetch from; an empty list allows any host
    #[serde(default = "default_preview_hosts")]
    pub preview_hosts: Vec<String>,
}

impl CatalogSettings {
    pub fn to_catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.base_url.clone(),
            market: self.market.clone(),
            seed_artists: self.seed_artists.clone(),
            seed_genres: self.seed_genres.clone(),
            preview_hosts: self.preview_hosts.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..CatalogConfig::default()
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading an explicit file when one is given
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. TUNEDECK__AUTH__JWT_SECRET.
        // TUNEDECK__CATALOG__PREVIEW_HOSTS takes a comma-separated list.
        settings = settings.add_source(
            config::Environment::with_prefix("TUNEDECK")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("catalog.preview_hosts"),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set TUNEDECK__AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.catalog.access_token.is_none() {
            tracing::warn!("No catalog access token configured; catalog routes will fail");
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/tunedeck.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    24
}

fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        base_url: default_catalog_base_url(),
        access_token: None,
        market: default_market(),
        timeout_secs: default_timeout_secs(),
        seed_artists: default_seed_artists(),
        seed_genres: default_seed_genres(),
        preview_hosts: default_preview_hosts(),
    }
}

fn default_catalog_base_url() -> String {
    CatalogConfig::default().base_url
}

fn default_market() -> String {
    CatalogConfig::default().market
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_seed_artists() -> String {
    CatalogConfig::default().seed_artists
}

fn default_seed_genres() -> String {
    CatalogConfig::default().seed_genres
}

fn default_preview_hosts() -> Vec<String> {
    CatalogConfig::default().preview_hosts
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            catalog: default_catalog(),
        }
    }
}
