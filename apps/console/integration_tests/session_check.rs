//! The console's login -> profile -> logout check against a mock backend.

use storefront_console::error::ConsoleError;
use storefront_console::session_check::run;

use api_client::{ApiClient, ClientConfig};
use models::LoginInput;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::builder()
        .with_base_url(server.uri())
        .build()
        .unwrap();
    ApiClient::new(&config).unwrap()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {"accessToken": "abc"}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn given_working_backend_when_check_runs_then_profile_read_and_session_closed() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": {"uuid": "u-1", "username": "alice", "roles": ["USER"]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Logged out successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let report = run(&client, &LoginInput::new("alice", "correct-horse"))
        .await
        .unwrap();

    assert_eq!(report.user.username, "alice");
    assert_eq!(report.logout_message, "Logged out successfully");
    assert!(!client.token_store().is_authenticated().await);
}

/// **BUG THIS CATCHES**: Returning early on the profile error would skip
/// logout and leave the session open on the server.
#[tokio::test]
async fn given_profile_fetch_fails_when_check_runs_then_still_logs_out() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "bye"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = run(&client_for(&server), &LoginInput::new("alice", "correct-horse")).await;

    assert!(matches!(
        result,
        Err(ConsoleError::Api {
            category: "server_error",
            ..
        })
    ));
}
