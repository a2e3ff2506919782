use crate::error::ConsoleError;
use crate::session_check::{ENV_PASSWORD, ENV_USERNAME, credentials_from_env};

use serial_test::serial;

fn set_credentials(username: Option<&str>, password: Option<&str>) {
    // SAFETY: env tests are serialized with #[serial]
    unsafe {
        match username {
            Some(value) => std::env::set_var(ENV_USERNAME, value),
            None => std::env::remove_var(ENV_USERNAME),
        }
        match password {
            Some(value) => std::env::set_var(ENV_PASSWORD, value),
            None => std::env::remove_var(ENV_PASSWORD),
        }
    }
}

#[test]
#[serial]
fn given_both_variables_when_reading_credentials_then_login_input_built() {
    set_credentials(Some("alice"), Some("correct-horse"));

    let input = credentials_from_env();
    set_credentials(None, None);

    let input = input.unwrap();
    assert_eq!(input.username, "alice");
    assert_eq!(input.password, "correct-horse");
}

#[test]
#[serial]
fn given_missing_password_when_reading_credentials_then_names_variable() {
    set_credentials(Some("alice"), None);

    let result = credentials_from_env();
    set_credentials(None, None);

    match result {
        Err(ConsoleError::MissingCredentials { variable, .. }) => {
            assert_eq!(variable, ENV_PASSWORD)
        }
        other => panic!("Expected MissingCredentials, got {other:?}"),
    }
}
