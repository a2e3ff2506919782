//! Login and token payloads.

use crate::error::model_error::ModelError;

use common::{AccessToken, ErrorLocation};

use std::fmt;
use std::ops::RangeInclusive;
use std::panic::Location;

use serde::{Deserialize, Serialize};

const USERNAME_LENGTH: RangeInclusive<usize> = 3..=32;
const PASSWORD_LENGTH: RangeInclusive<usize> = 8..=32;

/// `item` of the login and refresh responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGrant {
    pub access_token: AccessToken,
}

/// Credentials sent to `auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check the same bounds the backend enforces on sign-in, so obviously
    /// bad input fails without a round trip.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        check_field("username", &self.username, USERNAME_LENGTH)?;
        check_field("password", &self.password, PASSWORD_LENGTH)?;
        Ok(())
    }
}

#[track_caller]
fn check_field(
    field: &'static str,
    value: &str,
    bounds: RangeInclusive<usize>,
) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation {
            field,
            message: format!("{field} must not be blank"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let length = value.chars().count();
    if !bounds.contains(&length) {
        return Err(ModelError::Validation {
            field,
            message: format!(
                "{field} must be between {} and {} characters (got {length})",
                bounds.start(),
                bounds.end()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
