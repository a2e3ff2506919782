//! Bearer credential with redacted Debug output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// An access token that never exposes its value in logs or debug output.
///
/// Deserializes from a plain JSON string so it can be read straight out of
/// a login or refresh response, but refuses to serialize.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    inner: String,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            inner: token.into(),
        }
    }

    /// The raw token value.
    ///
    /// Only call this when building the `Authorization` header.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// `Bearer <token>` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.inner)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken([REDACTED])")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED ACCESS TOKEN]")
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(AccessToken::new)
    }
}

impl serde::Serialize for AccessToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("AccessToken cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
