//! Verb behaviour against a mock backend: envelopes, headers, error mapping.

use crate::helpers::{client_for, client_with_token, data, error, message, route};

use api_client::{ApiClient, ApiError, ClientConfig};
use models::Brand;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: A successful single-item response hands back the item exactly.
///
/// **BUG THIS CATCHES**: Decoding through a typed record with defaults would
/// inject fields the server never sent.
#[tokio::test]
async fn given_data_envelope_when_get_data_then_item_returned_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("products/uuid/x")))
        .respond_with(data(json!({"uuid": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let item: Value = client_for(&server)
        .get_data("products/uuid/x")
        .await
        .unwrap();

    assert_eq!(item, json!({"uuid": "x"}));
}

#[tokio::test]
async fn given_no_token_when_request_sent_then_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("categories")))
        .respond_with(data(json!([])))
        .mount(&server)
        .await;

    let _: Value = client_for(&server).get_data("categories").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn given_stored_token_when_request_sent_then_bearer_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(data(json!({"uuid": "u-1", "username": "alice"})))
        .expect(1)
        .mount(&server)
        .await;

    let user: Value = client_with_token(&server, "abc")
        .get_data("users/me")
        .await
        .unwrap();

    assert_eq!(user["username"], "alice");
}

#[tokio::test]
async fn given_body_when_post_data_then_json_sent_with_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("brands")))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"name": "Acme"})))
        .respond_with(data(json!({"id": 7, "name": "Acme"})))
        .expect(1)
        .mount(&server)
        .await;

    let created: Brand = client_for(&server)
        .post_data("brands", &Brand::new("Acme"))
        .await
        .unwrap();

    assert_eq!(created.id, Some(7));
}

#[tokio::test]
async fn given_message_envelope_when_delete_message_then_message_returned() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(route("brands/7")))
        .respond_with(message("Brand deleted"))
        .mount(&server)
        .await;

    let text = client_for(&server).delete_message("brands/7").await.unwrap();

    assert_eq!(text, "Brand deleted");
}

#[tokio::test]
async fn given_patch_without_body_when_patch_message_then_message_returned() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(route("orders/o-1/cancel")))
        .respond_with(message("Order cancelled"))
        .mount(&server)
        .await;

    let text = client_for(&server)
        .patch_message("orders/o-1/cancel", None::<&()>)
        .await
        .unwrap();

    assert_eq!(text, "Order cancelled");
}

#[tokio::test]
async fn given_binary_response_when_get_blob_then_bytes_and_content_type_returned() {
    let server = MockServer::start().await;
    let png = vec![0x89, b'P', b'N', b'G'];
    Mock::given(method("GET"))
        .and(path(route("images/uuid/i-1")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .mount(&server)
        .await;

    let blob = client_for(&server).get_blob("images/uuid/i-1").await.unwrap();

    assert_eq!(blob.bytes, png);
    assert_eq!(blob.mime_type(), "image/png");
}

/// **VALUE**: A 401 that is not the expiry signal is an ordinary failure.
///
/// **BUG THIS CATCHES**: Refreshing on every 401 would turn a wrong password
/// into a refresh call and a confusing "session ended" error.
#[tokio::test]
async fn given_401_with_other_code_when_request_sent_then_http_error_and_no_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .respond_with(error(401, "ACCOUNT_101", "Bad credentials"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("auth/refresh")))
        .respond_with(data(json!({"accessToken": "never"})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_with_token(&server, "abc")
        .get_data::<Value>("users/me")
        .await;

    match result {
        Err(error) => {
            assert_eq!(error.status_code(), Some(401));
            assert_eq!(error.error_code(), Some("ACCOUNT_101"));
            assert!(!error.requires_reauthentication());
        }
        Ok(value) => panic!("Expected Http error, got {value:?}"),
    }
}

#[tokio::test]
async fn given_server_error_when_request_sent_then_http_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("brands/1")))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .get_data::<Brand>("brands/1")
        .await
        .unwrap_err();

    assert_eq!(error.error_category(), "server_error");
    assert!(error.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn given_success_without_item_when_get_data_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("brands/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .get_data::<Value>("brands/1")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Decode { .. }));
}

#[tokio::test]
async fn given_absolute_url_when_request_sent_then_invalid_path_and_no_io() {
    let server = MockServer::start().await;

    let error = client_for(&server)
        .get_data::<Value>("http://elsewhere.example.com/brands")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::InvalidPath { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_unreachable_server_when_request_sent_then_connection_transport_error() {
    let config = ClientConfig::builder()
        .with_base_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let error = ApiClient::new(&config)
        .unwrap()
        .get_data::<Value>("brands")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ApiError::Transport {
            is_connection: true,
            ..
        }
    ));
}

#[tokio::test]
async fn given_slow_server_when_timeout_elapses_then_timeout_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("brands")))
        .respond_with(data(json!([])).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    let config = ClientConfig::builder()
        .with_base_url(server.uri())
        .with_timeout_secs(1)
        .build()
        .unwrap();

    let error = ApiClient::new(&config)
        .unwrap()
        .get_data::<Value>("brands")
        .await
        .unwrap_err();

    assert_eq!(error.error_category(), "timeout");
}
