//! Sign-in, sign-out and profile flows.

use crate::helpers::{client_for, client_with_token, data, error, message, route};

use api_client::ApiError;
use models::{LoginInput, UpdateUser, UserFinder};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(username: &str) -> serde_json::Value {
    json!({
        "uuid": "u-1",
        "username": username,
        "fullName": "Alice Doe",
        "email": "alice@example.com",
        "roles": ["USER"]
    })
}

/// **VALUE**: The login scenario: the issued token authorizes the next call.
#[tokio::test]
async fn given_valid_credentials_when_login_then_next_request_carries_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("auth/login")))
        .and(body_json(json!({"username": "alice", "password": "correct-horse"})))
        .respond_with(data(json!({"accessToken": "abc"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(data(user_json("alice")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = client.session();
    session
        .login(&LoginInput::new("alice", "correct-horse"))
        .await
        .unwrap();
    let user = session.current_user().await.unwrap();

    assert!(session.is_authenticated().await);
    assert_eq!(user.username, "alice");
    assert_eq!(user.full_name, "Alice Doe");
}

#[tokio::test]
async fn given_short_password_when_login_then_invalid_input_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("auth/login")))
        .respond_with(data(json!({"accessToken": "abc"})))
        .expect(0)
        .mount(&server)
        .await;

    let error = client_for(&server)
        .session()
        .login(&LoginInput::new("alice", "short"))
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::InvalidInput { .. }));
}

#[tokio::test]
async fn given_wrong_password_when_login_then_http_error_and_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("auth/login")))
        .respond_with(error(401, "ACCOUNT_101", "Invalid username or password"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .session()
        .login(&LoginInput::new("alice", "wrong-password"))
        .await
        .unwrap_err();

    assert_eq!(error.error_code(), Some("ACCOUNT_101"));
    assert!(!client.token_store().is_authenticated().await);
}

/// **VALUE**: A login answer without a usable token is a failed login.
///
/// **BUG THIS CATCHES**: Storing `""` marks the session signed in while every
/// following request goes out with a bare `Bearer ` header.
#[tokio::test]
async fn given_login_grant_with_empty_token_when_login_then_decode_error_and_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("auth/login")))
        .respond_with(data(json!({"accessToken": ""})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .respond_with(error(401, "ACCOUNT_100", "Authentication required"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = client.session();
    let error = session
        .login(&LoginInput::new("alice", "correct-horse"))
        .await
        .unwrap_err();
    let _ = session.current_user().await;

    assert!(matches!(error, ApiError::Decode { .. }));
    assert!(!session.is_authenticated().await);
    let requests = server.received_requests().await.unwrap();
    let me = requests
        .iter()
        .find(|request| request.url.path().ends_with("users/me"))
        .unwrap();
    assert!(!me.headers.contains_key("authorization"));
}

#[tokio::test]
async fn given_signed_in_when_logout_then_message_returned_and_token_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("auth/logout")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(message("Logged out successfully"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, "abc");
    let text = client.session().logout().await.unwrap();

    assert_eq!(text, "Logged out successfully");
    assert!(!client.token_store().is_authenticated().await);
}

/// **BUG THIS CATCHES**: A server hiccup during sign-out must not leave the
/// user signed in locally.
#[tokio::test]
async fn given_logout_call_fails_when_logout_then_token_still_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("auth/logout")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_with_token(&server, "abc");
    let result = client.session().logout().await;

    assert!(result.is_err());
    assert!(!client.token_store().is_authenticated().await);
}

/// **VALUE**: The refresh cookie set at login is what renews the session.
#[tokio::test]
async fn given_refresh_cookie_from_login_when_session_refreshed_then_new_token_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("auth/login")))
        .respond_with(
            data(json!({"accessToken": "abc"}))
                .insert_header("Set-Cookie", "refreshToken=r-1; Path=/; HttpOnly"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("auth/refresh")))
        .and(header("Cookie", "refreshToken=r-1"))
        .respond_with(data(json!({"accessToken": "def"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let session = client.session();
    session
        .login(&LoginInput::new("alice", "correct-horse"))
        .await
        .unwrap();
    session.refresh().await.unwrap();

    assert_eq!(client.token_store().get().await.unwrap().as_str(), "def");
}

#[tokio::test]
async fn given_email_finder_when_update_user_then_patch_sent_to_encoded_path() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(route("users/email/alice%40example.com")))
        .and(body_json(json!({"fullName": "Alice Smith"})))
        .respond_with(data(json!({
            "uuid": "u-1",
            "username": "alice",
            "fullName": "Alice Smith"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = UpdateUser {
        full_name: Some("Alice Smith".to_string()),
        ..UpdateUser::default()
    };
    let user = client_with_token(&server, "abc")
        .session()
        .update_user(&UserFinder::Email("alice@example.com".to_string()), &update)
        .await
        .unwrap();

    assert_eq!(user.full_name, "Alice Smith");
}
