//! Expiry recovery: single-flight refresh and retry-once.

use crate::helpers::{client_with_token, data, error, expired, route};

use api_client::ApiError;
use common::AccessToken;

use std::time::Duration;

use futures_util::future::join_all;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer};

const CONCURRENT_REQUESTS: usize = 8;

async fn mount_refresh(server: &MockServer, token: &str, delay: Duration, calls: u64) {
    Mock::given(method("GET"))
        .and(path(route("auth/refresh")))
        .respond_with(data(json!({"accessToken": token})).set_delay(delay))
        .expect(calls)
        .mount(server)
        .await;
}

/// **VALUE**: The refresh-retry scenario end to end.
///
/// **WHY THIS MATTERS**: This is the path every user hits when their access
/// token ages out mid-session; it must be invisible to the caller.
#[tokio::test]
async fn given_expired_token_when_request_sent_then_refreshed_and_retried_with_new_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .and(header("Authorization", "Bearer def"))
        .respond_with(data(json!({"uuid": "u-1"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "def", Duration::ZERO, 1).await;

    let client = client_with_token(&server, "abc");
    let user: Value = client.get_data("users/me").await.unwrap();

    assert_eq!(user, json!({"uuid": "u-1"}));
    assert_eq!(client.token_store().get().await.unwrap().as_str(), "def");
}

/// **VALUE**: N concurrent expiries cause exactly one refresh call, and each
/// request is retried exactly once with the renewed token.
///
/// **WHY THIS MATTERS**: Refresh tokens are often single-use. A second
/// refresh racing the first would invalidate the session for everyone.
///
/// **BUG THIS CATCHES**: A coordinator that checks "is a refresh running?"
/// and starts one in two separate steps lets several requests through.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_concurrent_expired_requests_when_sent_then_exactly_one_refresh() {
    let server = MockServer::start().await;
    let n = CONCURRENT_REQUESTS as u64;
    Mock::given(method("GET"))
        .and(path(route("cart")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(expired())
        .expect(n)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("cart")))
        .and(header("Authorization", "Bearer def"))
        .respond_with(data(json!({"lines": 3})))
        .expect(n)
        .mount(&server)
        .await;
    mount_refresh(&server, "def", Duration::from_millis(300), 1).await;

    let client = client_with_token(&server, "abc");
    let requests = (0..CONCURRENT_REQUESTS).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.get_data::<Value>("cart").await })
    });

    for outcome in join_all(requests).await {
        assert_eq!(outcome.unwrap().unwrap(), json!({"lines": 3}));
    }
    assert!(!client.refresher().is_refreshing().await);
}

/// **VALUE**: A failed refresh ends the session for every waiter at once.
///
/// **BUG THIS CATCHES**: Leaving the stale token in the store would make the
/// next request trigger yet another doomed refresh.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_refresh_rejected_when_concurrent_requests_wait_then_all_fail_and_store_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("cart")))
        .respond_with(expired())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("auth/refresh")))
        .respond_with(
            error(401, "ACCOUNT_108", "Refresh token is expired")
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, "abc");
    let requests = (0..CONCURRENT_REQUESTS).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.get_data::<Value>("cart").await })
    });

    for outcome in join_all(requests).await {
        let error = outcome.unwrap().unwrap_err();
        assert!(
            matches!(error, ApiError::RefreshFailed { .. }),
            "Expected RefreshFailed, got {error:?}"
        );
        assert!(error.requires_reauthentication());
    }
    assert!(client.token_store().get().await.is_none());
    assert!(!client.refresher().is_refreshing().await);
}

#[tokio::test]
async fn given_refresh_body_without_token_when_refreshing_then_refresh_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .respond_with(expired())
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("auth/refresh")))
        .respond_with(data(json!({"somethingElse": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, "abc");
    let error = client.get_data::<Value>("users/me").await.unwrap_err();

    assert!(matches!(error, ApiError::RefreshFailed { .. }));
    assert!(!client.token_store().is_authenticated().await);
}

/// **VALUE**: At most one retry per request.
///
/// **BUG THIS CATCHES**: Retrying inside the response hook without a guard
/// loops forever against a server that keeps rejecting the new token.
#[tokio::test]
async fn given_token_rejected_again_after_refresh_when_request_sent_then_auth_expired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .respond_with(expired())
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, "def", Duration::ZERO, 1).await;

    let error = client_with_token(&server, "abc")
        .get_data::<Value>("users/me")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::AuthExpired { ref code, .. } if code == "ACCOUNT_107"));
}

/// **VALUE**: A request that comes back expired after someone else already
/// renewed the token retries with that token instead of refreshing again.
#[tokio::test]
async fn given_token_renewed_while_in_flight_when_late_expiry_arrives_then_no_second_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("slow")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(expired().set_delay(Duration::from_millis(400)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("slow")))
        .and(header("Authorization", "Bearer def"))
        .respond_with(data(json!("ok")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("fast")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("fast")))
        .and(header("Authorization", "Bearer def"))
        .respond_with(data(json!("ok")))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "def", Duration::ZERO, 1).await;

    let client = client_with_token(&server, "abc");
    let slow_client = client.clone();
    let slow = tokio::spawn(async move { slow_client.get_data::<String>("slow").await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let fast: String = client.get_data("fast").await.unwrap();
    let slow: String = slow.await.unwrap().unwrap();

    assert_eq!((fast.as_str(), slow.as_str()), ("ok", "ok"));
}

#[tokio::test]
async fn given_expired_token_on_post_when_retried_then_body_resent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(route("reviews")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(expired())
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(route("reviews")))
        .and(header("Authorization", "Bearer def"))
        .and(wiremock::matchers::body_json(json!({"rating": 5})))
        .respond_with(data(json!({"uuid": "r-1"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, "def", Duration::ZERO, 1).await;

    let created: Value = client_with_token(&server, "abc")
        .post_data("reviews", &json!({"rating": 5}))
        .await
        .unwrap();

    assert_eq!(created["uuid"], "r-1");
}

/// **VALUE**: A login that lands while a renewal is in flight wins over the
/// renewal's result.
///
/// **BUG THIS CATCHES**: Writing the refreshed token unconditionally replaces
/// the account the user just signed in with.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_login_during_refresh_when_refresh_succeeds_then_login_token_kept() {
    let server = MockServer::start().await;
    mount_refresh(&server, "def", Duration::from_millis(300), 1).await;

    let client = client_with_token(&server, "abc");
    let renewing = client.clone();
    let refresh = tokio::spawn(async move { renewing.session().refresh().await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.token_store().set(AccessToken::new("login-token")).await;

    refresh.await.unwrap().unwrap();

    assert_eq!(
        client.token_store().get().await.unwrap().as_str(),
        "login-token"
    );
    assert!(!client.refresher().is_refreshing().await);
}

/// **VALUE**: A renewal that fails after a fresh login does not sign the user
/// out.
///
/// **BUG THIS CATCHES**: Clearing the store unconditionally on failure drops
/// the token the login just stored.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_login_during_refresh_when_refresh_fails_then_login_token_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route("users/me")))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(route("auth/refresh")))
        .respond_with(
            error(401, "ACCOUNT_108", "Refresh token is expired")
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_token(&server, "abc");
    let expiring = client.clone();
    let request = tokio::spawn(async move { expiring.get_data::<Value>("users/me").await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    client.token_store().set(AccessToken::new("login-token")).await;

    let error = request.await.unwrap().unwrap_err();

    assert!(matches!(error, ApiError::RefreshFailed { .. }));
    assert_eq!(
        client.token_store().get().await.unwrap().as_str(),
        "login-token"
    );
}
