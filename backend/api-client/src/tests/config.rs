use crate::config::{
    CONFIG_FILE_NAME, ClientConfig, ENV_API_URL, ENV_AUTH_EXPIRED_CODE, ENV_TIMEOUT_SECS,
};
use crate::error::config::ConfigError;

use std::io::Write;

use serial_test::serial;
use tempfile::TempDir;

fn clear_env() {
    // SAFETY: env tests are serialized with #[serial]
    unsafe {
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_TIMEOUT_SECS);
        std::env::remove_var(ENV_AUTH_EXPIRED_CODE);
    }
}

#[test]
fn given_default_config_when_validated_then_ok() {
    let config = ClientConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.auth_expired_code, "ACCOUNT_107");
    assert!(config.with_credentials);
}

/// **VALUE**: The API root always ends in `/`, whatever the slashes in the
/// configured pieces.
///
/// **BUG THIS CATCHES**: `Url::join` replaces the last segment of a root
/// without a trailing slash, so `api/v1` + `brands` would become `api/brands`.
#[test]
fn given_base_and_prefix_with_stray_slashes_when_api_root_then_single_trailing_slash() {
    let config = ClientConfig::builder()
        .with_base_url("https://shop.example.com/")
        .with_api_prefix("/api/v1/")
        .build()
        .unwrap();

    assert_eq!(
        config.api_root().unwrap().as_str(),
        "https://shop.example.com/api/v1/"
    );
}

#[test]
fn given_empty_prefix_when_api_root_then_base_with_slash() {
    let config = ClientConfig::builder()
        .with_base_url("http://localhost:9000")
        .with_api_prefix("")
        .build()
        .unwrap();

    assert_eq!(config.api_root().unwrap().as_str(), "http://localhost:9000/");
}

#[test]
fn given_non_http_base_url_when_built_then_validation_error() {
    let result = ClientConfig::builder().with_base_url("ftp://host").build();

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_zero_timeout_when_built_then_validation_error() {
    let result = ClientConfig::builder().with_timeout_secs(0).build();

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_blank_expiry_code_when_built_then_validation_error() {
    let result = ClientConfig::builder().with_auth_expired_code("  ").build();

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
fn given_missing_file_when_loaded_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = ClientConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

    assert_eq!(config, ClientConfig::default());
}

#[test]
fn given_partial_toml_file_when_loaded_then_missing_fields_defaulted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "base_url = \"https://api.example.com\"").unwrap();
    writeln!(file, "timeout_secs = 5").unwrap();

    let config = ClientConfig::load(&path).unwrap();

    assert_eq!(config.base_url, "https://api.example.com");
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.api_prefix, "api/v1");
}

#[test]
fn given_malformed_toml_when_loaded_then_parse_error_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();

    match ClientConfig::load(&path) {
        Err(ConfigError::ParseError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
#[serial]
fn given_env_overrides_when_applied_then_fields_replaced() {
    clear_env();
    // SAFETY: serialized
    unsafe {
        std::env::set_var(ENV_API_URL, "https://staging.example.com");
        std::env::set_var(ENV_TIMEOUT_SECS, "12");
        std::env::set_var(ENV_AUTH_EXPIRED_CODE, "TOKEN_EXPIRED");
    }

    let config = ClientConfig::default().with_env_overrides();
    clear_env();
    let config = config.unwrap();

    assert_eq!(config.base_url, "https://staging.example.com");
    assert_eq!(config.timeout_secs, 12);
    assert_eq!(config.auth_expired_code, "TOKEN_EXPIRED");
}

#[test]
#[serial]
fn given_unparseable_env_timeout_when_applied_then_env_error_names_variable() {
    clear_env();
    // SAFETY: serialized
    unsafe {
        std::env::set_var(ENV_TIMEOUT_SECS, "soon");
    }

    let result = ClientConfig::default().with_env_overrides();
    clear_env();

    match result {
        Err(ConfigError::EnvError { variable, .. }) => assert_eq!(variable, ENV_TIMEOUT_SECS),
        other => panic!("Expected EnvError, got {other:?}"),
    }
}

#[test]
#[serial]
fn given_blank_env_value_when_applied_then_ignored() {
    clear_env();
    // SAFETY: serialized
    unsafe {
        std::env::set_var(ENV_API_URL, "   ");
    }

    let config = ClientConfig::default().with_env_overrides();
    clear_env();

    assert_eq!(config.unwrap().base_url, "http://localhost:8080");
}
