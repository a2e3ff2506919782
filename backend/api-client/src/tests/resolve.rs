// Path resolution: every request URL must stay under the configured API root

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;

fn client() -> ApiClient {
    let config = ClientConfig::builder()
        .with_base_url("https://shop.example.com")
        .with_api_prefix("api/v1")
        .build()
        .unwrap();
    ApiClient::new(&config).unwrap()
}

#[test]
fn given_relative_path_when_resolved_then_joined_under_root() {
    let url = client().resolve("products/uuid/x").unwrap();

    assert_eq!(url.as_str(), "https://shop.example.com/api/v1/products/uuid/x");
}

/// **VALUE**: A leading slash means "relative to the API root", not the host.
///
/// **BUG THIS CATCHES**: Plain `Url::join("/brands")` drops the `api/v1`
/// prefix and hits `https://shop.example.com/brands`.
#[test]
fn given_leading_slash_when_resolved_then_same_as_relative() {
    let client = client();

    assert_eq!(
        client.resolve("/brands").unwrap(),
        client.resolve("brands").unwrap()
    );
}

#[test]
fn given_query_string_when_resolved_then_query_kept() {
    let url = client().resolve("brands?page=0&size=10").unwrap();

    assert_eq!(url.query(), Some("page=0&size=10"));
}

#[test]
fn given_absolute_url_when_resolved_then_invalid_path() {
    let result = client().resolve("https://evil.example.com/steal");

    assert!(matches!(result, Err(ApiError::InvalidPath { .. })));
}

#[test]
fn given_scheme_relative_url_when_resolved_then_invalid_path() {
    let result = client().resolve("//evil.example.com/steal");

    assert!(matches!(result, Err(ApiError::InvalidPath { .. })));
}

#[test]
fn given_dot_dot_escape_when_resolved_then_invalid_path() {
    let result = client().resolve("../../admin");

    assert!(matches!(result, Err(ApiError::InvalidPath { .. })));
}

#[test]
fn given_empty_path_when_resolved_then_invalid_path() {
    let result = client().resolve("   ");

    assert!(matches!(result, Err(ApiError::InvalidPath { .. })));
}
