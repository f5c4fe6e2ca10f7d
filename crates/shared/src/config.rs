//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Geocoding configuration (optional; map plotting degrades without it).
    #[serde(default)]
    pub geocoding: Option<GeocodingConfig>,
    /// Object storage configuration (optional; attachments degrade without it).
    #[serde(default)]
    pub storage: Option<StorageSettings>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Geocoding service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the geocoding endpoint.
    pub base_url: String,
    /// API key sent with each lookup.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_geocode_timeout")]
    pub timeout_secs: u64,
}

fn default_geocode_timeout() -> u64 {
    5
}

/// Object storage settings, deserialized into `core`'s `StorageConfig` shape.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider kind: `s3`, `azure_blob`, or `local`.
    pub provider: String,
    /// S3 endpoint URL (s3 only).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Bucket or container name.
    #[serde(default)]
    pub bucket: Option<String>,
    /// Access key id / account name.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key / account key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Region (s3 only).
    #[serde(default)]
    pub region: Option<String>,
    /// Root directory (local only).
    #[serde(default)]
    pub root: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FIELDOPS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
