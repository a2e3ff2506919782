use crate::error::ConsoleError;

use api_client::{ApiError, ConfigError};
use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

#[test]
fn given_refresh_failure_when_converted_then_marks_reauthentication() {
    let error: ConsoleError = ApiError::refresh_failed("cookie expired", Some(HttpStatusCode(401))).into();

    match error {
        ConsoleError::Api {
            category,
            reauthenticate,
            ..
        } => {
            assert_eq!(category, "refresh_failed");
            assert!(reauthenticate);
        }
        other => panic!("Expected Api variant, got {other:?}"),
    }
}

#[test]
fn given_config_error_when_converted_then_message_kept() {
    let source = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "Invalid timeout: 0s".to_string(),
    };

    let error: ConsoleError = source.into();

    assert!(error.to_string().contains("Invalid timeout: 0s"));
}
