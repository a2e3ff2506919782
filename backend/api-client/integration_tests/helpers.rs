//! Shared fixtures for the wiremock-backed integration tests.

use api_client::{ApiClient, ClientConfig, TokenStore};
use common::AccessToken;

use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};

pub const API_PREFIX: &str = "api/v1";
pub const EXPIRED_CODE: &str = "ACCOUNT_107";

/// Full mock path for an endpoint, e.g. `route("users/me")` -> `/api/v1/users/me`.
pub fn route(endpoint: &str) -> String {
    format!("/{API_PREFIX}/{endpoint}")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .with_base_url(server.uri())
        .with_api_prefix(API_PREFIX)
        .with_timeout_secs(5)
        .build()
        .expect("valid test config")
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&config_for(server)).expect("client builds")
}

pub fn client_with_token(server: &MockServer, token: &str) -> ApiClient {
    ApiClient::with_token_store(
        &config_for(server),
        TokenStore::with_token(AccessToken::new(token)),
    )
    .expect("client builds")
}

pub fn data(item: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "item": item,
        "instance": "/test",
        "timestamp": "2025-01-01T00:00:00Z"
    }))
}

pub fn message(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "message": text }))
}

pub fn error(status: u16, code: &str, text: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "code": code,
        "message": text,
        "instance": "/test"
    }))
}

pub fn expired() -> ResponseTemplate {
    error(401, EXPIRED_CODE, "Credential token is expired")
}

pub fn page(items: Value, total_items: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "items": items,
        "page": {
            "page": 0,
            "size": 20,
            "totalItems": total_items,
            "totalPages": 1,
            "hasNext": false,
            "hasPrevious": false
        }
    }))
}
