//! Configuration types for logdrop

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// Remote log store connection settings
///
/// Groups everything needed to query the remote store: endpoint, project
/// identifier, credentials, and the pagination page size.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogStoreConfig {
    /// Base URL of the remote log store API (default: "http://localhost:8080")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Project identifier sent with every query
    #[serde(default)]
    pub project: String,

    /// Access key id for the remote store (None = unauthenticated store)
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Access key secret for the remote store
    #[serde(default)]
    pub access_key_secret: Option<String>,

    /// Records requested per page (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for LogStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            project: String::new(),
            access_key_id: None,
            access_key_secret: None,
            page_size: default_page_size(),
        }
    }
}

/// Artifact lifecycle settings
///
/// Controls where exported files live, how long they survive, and how
/// download links are rendered. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Managed directory for exported files (default: "./exported_logs")
    #[serde(default = "default_artifact_dir")]
    pub dir: PathBuf,

    /// Seconds an artifact survives after a successful export (default: 180)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Base URL used when building absolute download links
    /// (None = relative links)
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: default_artifact_dir(),
            ttl_secs: default_ttl_secs(),
            public_base_url: None,
        }
    }
}

impl ArtifactConfig {
    /// Artifact time-to-live as a [`Duration`]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// API server settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bind address for the API server (default: "0.0.0.0:8000")
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Bearer token required on export submissions (None = auth disabled)
    #[serde(default)]
    pub api_token: Option<String>,

    /// Enable CORS (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins, "*" for any (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Serve interactive Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            api_token: None,
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Main configuration for the export service
///
/// Fields are organized into logical sub-configs:
/// - [`log_store`](LogStoreConfig) — remote store endpoint, credentials, page size
/// - [`artifacts`](ArtifactConfig) — managed directory, TTL, link rendering
/// - [`api`](ApiConfig) — bind address, auth token, CORS, Swagger UI
///
/// Credentials and endpoints are never hard-coded; use [`Config::from_env`]
/// to overlay them from the environment, or construct the struct directly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote log store settings
    #[serde(default)]
    pub log_store: LogStoreConfig,

    /// Artifact lifecycle settings
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// API server settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Build a configuration from defaults overlaid with environment variables.
    ///
    /// Recognized variables:
    /// - `LOGDROP_ENDPOINT` — remote store base URL
    /// - `LOGDROP_PROJECT` — remote store project identifier
    /// - `LOGDROP_ACCESS_KEY_ID` / `LOGDROP_ACCESS_KEY_SECRET` — store credentials
    /// - `LOGDROP_API_TOKEN` — bearer token required on export submissions
    /// - `LOGDROP_ARTIFACT_DIR` — managed artifact directory
    /// - `LOGDROP_PUBLIC_BASE_URL` — base URL for absolute download links
    /// - `LOGDROP_BIND_ADDRESS` — API server bind address
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(endpoint) = std::env::var("LOGDROP_ENDPOINT") {
            config.log_store.endpoint = endpoint;
        }
        if let Ok(project) = std::env::var("LOGDROP_PROJECT") {
            config.log_store.project = project;
        }
        if let Ok(id) = std::env::var("LOGDROP_ACCESS_KEY_ID") {
            config.log_store.access_key_id = Some(id);
        }
        if let Ok(secret) = std::env::var("LOGDROP_ACCESS_KEY_SECRET") {
            config.log_store.access_key_secret = Some(secret);
        }
        if let Ok(token) = std::env::var("LOGDROP_API_TOKEN") {
            config.api.api_token = Some(token);
        }
        if let Ok(dir) = std::env::var("LOGDROP_ARTIFACT_DIR") {
            config.artifacts.dir = PathBuf::from(dir);
        }
        if let Ok(base) = std::env::var("LOGDROP_PUBLIC_BASE_URL") {
            config.artifacts.public_base_url = Some(base);
        }
        if let Ok(addr) = std::env::var("LOGDROP_BIND_ADDRESS") {
            config.api.bind_address = addr.parse().map_err(|e| Error::Config {
                message: format!("invalid bind address {addr:?}: {e}"),
                key: Some("api.bind_address".to_string()),
            })?;
        }

        Ok(config)
    }
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_page_size() -> usize {
    100
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("./exported_logs")
}

fn default_ttl_secs() -> u64 {
    180
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
