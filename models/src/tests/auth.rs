use crate::{LoginInput, TokenGrant};

use serde_json::json;

/// **VALUE**: Valid credentials pass local validation untouched.
#[test]
fn given_valid_credentials_when_validated_then_ok() {
    let input = LoginInput::new("alice", "password1");

    assert!(input.validate().is_ok());
}

/// **VALUE**: Blank usernames fail before any network call.
///
/// **BUG THIS CATCHES**: Would catch whitespace-only input slipping through a plain
/// `is_empty()` check and costing a round trip that can only fail.
#[test]
fn given_blank_username_when_validated_then_names_username_field() {
    let input = LoginInput::new("   ", "password1");

    let err = input.validate().unwrap_err();

    assert_eq!(err.field(), "username");
    assert!(err.to_string().contains("must not be blank"));
}

#[test]
fn given_short_password_when_validated_then_reports_bounds() {
    let input = LoginInput::new("alice", "pw");

    let err = input.validate().unwrap_err();

    assert_eq!(err.field(), "password");
    assert!(err.to_string().contains("between 8 and 32"));
}

#[test]
fn given_overlong_username_when_validated_then_fails() {
    let input = LoginInput::new("a".repeat(33), "password1");

    assert_eq!(input.validate().unwrap_err().field(), "username");
}

/// **VALUE**: The password must never appear in Debug output (request logging).
#[test]
fn given_login_input_when_debug_formatted_then_password_redacted() {
    let input = LoginInput::new("alice", "hunter22");

    let debug = format!("{:?}", input);

    assert!(debug.contains("alice"));
    assert!(!debug.contains("hunter22"));
}

#[test]
fn given_login_input_when_serialized_then_sends_both_fields() {
    let input = LoginInput::new("alice", "password1");

    let body = serde_json::to_value(&input).unwrap();

    assert_eq!(body, json!({"username": "alice", "password": "password1"}));
}

#[test]
fn given_camel_case_grant_when_deserialized_then_reads_access_token() {
    let grant: TokenGrant = serde_json::from_value(json!({"accessToken": "abc"})).unwrap();

    assert_eq!(grant.access_token.as_str(), "abc");
}
