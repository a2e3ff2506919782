use crate::error::ApiError;

use common::HttpStatusCode;
use models::ErrorEnvelope;

fn envelope(code: &str, message: &str) -> ErrorEnvelope {
    ErrorEnvelope {
        code: code.to_string(),
        message: message.to_string(),
        instance: String::new(),
        timestamp: String::new(),
    }
}

#[test]
fn given_error_envelope_when_building_http_error_then_code_and_message_kept() {
    let error = ApiError::from_http_response(
        404,
        Some(envelope("PRODUCT_404", "Product not found")),
        "{}",
    );

    assert_eq!(error.status_code(), Some(404));
    assert_eq!(error.error_code(), Some("PRODUCT_404"));
    assert_eq!(error.error_category(), "client_error");
    assert!(error.to_string().contains("Product not found (PRODUCT_404)"));
}

#[test]
fn given_no_envelope_when_building_http_error_then_raw_body_is_message() {
    let error = ApiError::from_http_response(502, None, "Bad Gateway");

    match &error {
        ApiError::Http { message, envelope, .. } => {
            assert_eq!(message, "Bad Gateway");
            assert!(envelope.is_none());
        }
        other => panic!("Expected Http, got {other:?}"),
    }
    assert_eq!(error.error_category(), "server_error");
}

/// **VALUE**: Only the terminal session errors ask the user to sign in again.
#[test]
fn given_each_variant_when_checking_reauthentication_then_only_session_errors_true() {
    assert!(ApiError::refresh_failed("gone", None).requires_reauthentication());
    assert!(ApiError::auth_expired("ACCOUNT_107").requires_reauthentication());

    assert!(!ApiError::from_http_response(401, None, "").requires_reauthentication());
    assert!(!ApiError::decode("x").requires_reauthentication());
    assert!(!ApiError::invalid_path("x", "y").requires_reauthentication());
}

#[test]
fn given_http_error_when_turned_into_refresh_failure_then_status_carried() {
    let error = ApiError::from_http_response(403, Some(envelope("AUTH_403", "no")), "")
        .into_refresh_failure();

    match error {
        ApiError::RefreshFailed { status, .. } => {
            assert_eq!(status, Some(HttpStatusCode(403)))
        }
        other => panic!("Expected RefreshFailed, got {other:?}"),
    }
}

#[test]
fn given_refresh_failure_when_converted_again_then_unchanged() {
    let original = ApiError::refresh_failed("expired cookie", Some(HttpStatusCode(401)));

    let converted = original.into_refresh_failure();

    assert!(matches!(
        converted,
        ApiError::RefreshFailed { ref message, .. } if message == "expired cookie"
    ));
}

#[test]
fn given_error_when_displayed_then_includes_capture_location() {
    let error = ApiError::decode("bad body");

    assert!(error.to_string().contains("tests/error.rs"));
}
