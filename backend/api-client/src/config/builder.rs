use super::ClientConfig;
use crate::error::config::ConfigError;

/// Fluent construction of a validated [`ClientConfig`].
///
/// Unset fields keep their defaults.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    api_prefix: Option<String>,
    with_credentials: Option<bool>,
    timeout_secs: Option<u64>,
    auth_expired_code: Option<String>,
    refresh_path: Option<String>,
}

impl ClientConfigBuilder {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    pub fn with_credentials(mut self, include: bool) -> Self {
        self.with_credentials = Some(include);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_auth_expired_code(mut self, code: impl Into<String>) -> Self {
        self.auth_expired_code = Some(code.into());
        self
    }

    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = Some(path.into());
        self
    }

    /// Build the config with validation.
    #[track_caller]
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let defaults = ClientConfig::default();

        let config = ClientConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            api_prefix: self.api_prefix.unwrap_or(defaults.api_prefix),
            with_credentials: self.with_credentials.unwrap_or(defaults.with_credentials),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            auth_expired_code: self.auth_expired_code.unwrap_or(defaults.auth_expired_code),
            refresh_path: self.refresh_path.unwrap_or(defaults.refresh_path),
        };

        config.validate()?;
        Ok(config)
    }
}
