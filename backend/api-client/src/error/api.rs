//! Error type for every request issued through [`ApiClient`](crate::ApiClient).
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - The server's error envelope is kept when the body had one
//! - `Clone`, so one refresh outcome can be handed to every waiter
//! - `#[track_caller]` constructors for automatic location capture

use common::{ErrorLocation, HttpStatusCode};
use models::{ErrorEnvelope, ModelError};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, Clone, ThisError)]
pub enum ApiError {
    /// No response was received (DNS, connect, timeout, broken body stream).
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP Error: {status} - {message} {location}")]
    Http {
        status: HttpStatusCode,
        envelope: Option<ErrorEnvelope>,
        message: String,
        location: ErrorLocation,
    },

    /// The body does not match the expected envelope.
    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    /// The token was rejected as expired again after a successful refresh.
    #[error("Auth Expired Error: {code} {location}")]
    AuthExpired {
        code: String,
        location: ErrorLocation,
    },

    /// Token renewal failed. The session is over and the token store is empty.
    #[error("Refresh Failed Error: {message} {location}")]
    RefreshFailed {
        message: String,
        status: Option<HttpStatusCode>,
        location: ErrorLocation,
    },

    /// The request path does not resolve under the configured API root.
    #[error("Invalid Path Error: '{path}': {message} {location}")]
    InvalidPath {
        path: String,
        message: String,
        location: ErrorLocation,
    },

    /// A request body could not be serialized.
    #[error("Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
    },

    /// A request model failed local validation.
    #[error("Invalid Input Error: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        ApiError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_path(path: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::InvalidPath {
            path: path.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth_expired(code: impl Into<String>) -> Self {
        ApiError::AuthExpired {
            code: code.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn refresh_failed(message: impl Into<String>, status: Option<HttpStatusCode>) -> Self {
        ApiError::RefreshFailed {
            message: message.into(),
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a non-2xx response.
    ///
    /// `body` is the raw response text; `envelope` is its decoded form when
    /// the server sent one.
    #[track_caller]
    pub fn from_http_response(
        status: u16,
        envelope: Option<ErrorEnvelope>,
        body: impl Into<String>,
    ) -> Self {
        let message = match &envelope {
            Some(envelope) if !envelope.message.is_empty() => {
                format!("{} ({})", envelope.message, envelope.code)
            }
            Some(envelope) => envelope.code.clone(),
            None => body.into(),
        };

        ApiError::Http {
            status: HttpStatusCode(status),
            envelope,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Turn any failure of the refresh call into the terminal refresh error.
    #[track_caller]
    pub fn into_refresh_failure(self) -> Self {
        match self {
            ApiError::RefreshFailed { .. } => self,
            other => {
                let status = other.status_code().map(HttpStatusCode);
                ApiError::refresh_failed(other.to_string(), status)
            }
        }
    }

    /// The session is gone and the user has to sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            ApiError::RefreshFailed { .. } | ApiError::AuthExpired { .. }
        )
    }

    /// Get HTTP status code if applicable.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(status.0),
            ApiError::RefreshFailed { status, .. } => status.map(|s| s.0),
            _ => None,
        }
    }

    /// Error code from the server's error envelope, if any.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Http {
                envelope: Some(envelope),
                ..
            } => Some(envelope.code.as_str()),
            ApiError::AuthExpired { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Get error category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::Transport {
                is_timeout: true, ..
            } => "timeout",
            ApiError::Transport {
                is_connection: true,
                ..
            } => "connection",
            ApiError::Transport { .. } => "transport",
            ApiError::Http { status, .. } if status.is_client_error() => "client_error",
            ApiError::Http { status, .. } if status.is_server_error() => "server_error",
            ApiError::Http { .. } => "http",
            ApiError::Decode { .. } => "decode",
            ApiError::AuthExpired { .. } => "auth_expired",
            ApiError::RefreshFailed { .. } => "refresh_failed",
            ApiError::InvalidPath { .. } => "invalid_path",
            ApiError::Encode { .. } => "encode",
            ApiError::InvalidInput { .. } => "invalid_input",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    /// Categorize before stringifying: timeouts and connection failures are
    /// flagged so callers can tell them apart without parsing messages.
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return ApiError::Decode {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        ApiError::Transport {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::InvalidPath {
            path: String::new(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for ApiError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ApiError::InvalidInput {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
