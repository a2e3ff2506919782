pub mod builder;

pub use builder::ClientConfigBuilder;

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

pub const CONFIG_FILE_NAME: &str = "client.toml";

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_API_PREFIX: &str = "STOREFRONT_API_PREFIX";
pub const ENV_WITH_CREDENTIALS: &str = "STOREFRONT_WITH_CREDENTIALS";
pub const ENV_TIMEOUT_SECS: &str = "STOREFRONT_TIMEOUT_SECS";
pub const ENV_AUTH_EXPIRED_CODE: &str = "STOREFRONT_AUTH_EXPIRED_CODE";

const MAX_TIMEOUT_SECS: u64 = 600;

// ============================================
// CONFIG STRUCT
// ============================================

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path under `base_url` that every request path is resolved against.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Keep a cookie store so the refresh-token cookie rides along.
    #[serde(default = "default_with_credentials")]
    pub with_credentials: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `ErrorEnvelope.code` that marks a 401 as "token expired, refresh and retry".
    #[serde(default = "default_auth_expired_code")]
    pub auth_expired_code: String,

    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            with_credentials: default_with_credentials(),
            timeout_secs: default_timeout_secs(),
            auth_expired_code: default_auth_expired_code(),
            refresh_path: default_refresh_path(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_api_prefix() -> String {
    "api/v1".to_string()
}
fn default_with_credentials() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_auth_expired_code() -> String {
    "ACCOUNT_107".to_string()
}
fn default_refresh_path() -> String {
    "auth/refresh".to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load config from a TOML file.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file does not exist.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::ParseError { reason, location, .. } => ConfigError::ParseError {
                location,
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        info!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: PathBuf::new(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load the file, then apply `.env` and process environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        try_load_dotenv();
        Self::load(path)?.with_env_overrides()
    }

    /// Override fields from `STOREFRONT_*` environment variables.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = read_env(ENV_API_URL)? {
            self.base_url = value;
        }
        if let Some(value) = read_env(ENV_API_PREFIX)? {
            self.api_prefix = value;
        }
        if let Some(value) = read_env(ENV_WITH_CREDENTIALS)? {
            self.with_credentials = parse_env(ENV_WITH_CREDENTIALS, &value)?;
        }
        if let Some(value) = read_env(ENV_TIMEOUT_SECS)? {
            self.timeout_secs = parse_env(ENV_TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = read_env(ENV_AUTH_EXPIRED_CODE)? {
            self.auth_expired_code = value;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid base URL format: {}", self.base_url),
            });
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid timeout: {}s (must be 1-{MAX_TIMEOUT_SECS})",
                    self.timeout_secs
                ),
            });
        }

        if self.auth_expired_code.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "auth_expired_code cannot be empty".to_string(),
            });
        }

        if self.refresh_path.trim_matches('/').is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "refresh_path cannot be empty".to_string(),
            });
        }

        self.api_root().map(|_| ())
    }

    /// `base_url` + `api_prefix`, always ending in `/` so relative joins
    /// stay underneath it.
    pub fn api_root(&self) -> Result<Url, ConfigError> {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');

        let root = if prefix.is_empty() {
            format!("{base}/")
        } else {
            format!("{base}/{prefix}/")
        };

        let url = Url::parse(&root).map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid API root '{root}': {e}"),
        })?;

        if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("API root '{root}' cannot carry a query or fragment"),
            });
        }

        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn read_env(variable: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => {
            debug!("Config override from {variable}");
            Ok(Some(value.trim().to_string()))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::EnvError {
            location: ErrorLocation::from(Location::caller()),
            variable,
            reason: "contains invalid unicode".to_string(),
        }),
    }
}

#[track_caller]
fn parse_env<T>(variable: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::EnvError {
        location: ErrorLocation::from(Location::caller()),
        variable,
        reason: format!("cannot parse '{value}': {e}"),
    })
}

/// Load `.env` from the working directory if present (non-fatal if missing).
fn try_load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded .env from: {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found - using process environment"),
        Err(e) => warn!("Failed to parse .env: {}", e),
    }
}
