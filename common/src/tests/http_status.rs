use crate::HttpStatusCode;

#[test]
fn given_status_codes_when_classified_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(301).is_success());

    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(404).is_server_error());

    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(503).is_client_error());
}

/// **VALUE**: Only 401 may start a refresh. 403 (forbidden) must never be treated
/// as an expired session.
#[test]
fn given_401_and_403_when_checking_unauthorized_then_only_401_matches() {
    assert!(HttpStatusCode(401).is_unauthorized());
    assert!(HttpStatusCode::from(401).is_unauthorized());
    assert!(!HttpStatusCode(403).is_unauthorized());
}

#[test]
fn given_status_when_displayed_then_prints_bare_number() {
    assert_eq!(HttpStatusCode(502).to_string(), "502");
}
