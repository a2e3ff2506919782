use crate::AccessToken;

/// **VALUE**: Verifies the token value never appears in Debug or Display output.
///
/// **WHY THIS MATTERS**: Request logging formats headers and errors with `{:?}`. A
/// token leaking there ends up in log files shipped off the machine.
///
/// **BUG THIS CATCHES**: Would catch someone replacing the manual Debug impl with
/// `#[derive(Debug)]`.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    let token = AccessToken::new("super-secret-value");

    let debug = format!("{:?}", token);
    let display = format!("{}", token);

    assert!(!debug.contains("super-secret-value"));
    assert!(!display.contains("super-secret-value"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_token_when_bearer_requested_then_prefixes_scheme() {
    let token = AccessToken::new("abc");

    assert_eq!(token.bearer(), "Bearer abc");
    assert_eq!(token.as_str(), "abc");
    assert_eq!(token.len(), 3);
    assert!(!token.is_empty());
}

/// **VALUE**: Login and refresh responses carry the token as a plain JSON string.
#[test]
fn given_json_string_when_deserialized_then_token_holds_value() {
    let token: AccessToken = serde_json::from_str("\"def\"").unwrap();

    assert_eq!(token.as_str(), "def");
}

/// **VALUE**: A token must never be written back out through serde by accident.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = AccessToken::new("abc");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "Serializing a token should fail");
}
