use api_client::{ApiError, ConfigError};
use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors surfaced by the console binary.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Local setup failed (directories, log file, logger).
    #[error("Console Error: {message} {location}")]
    Console {
        message: String,
        location: ErrorLocation,
    },

    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// A call to the storefront API failed.
    #[error("Api Error ({category}): {message} {location}")]
    Api {
        category: &'static str,
        message: String,
        reauthenticate: bool,
        location: ErrorLocation,
    },

    #[error("Missing Credentials Error: set {variable} {location}")]
    MissingCredentials {
        variable: &'static str,
        location: ErrorLocation,
    },
}

impl From<ApiError> for ConsoleError {
    #[track_caller]
    fn from(error: ApiError) -> Self {
        ConsoleError::Api {
            category: error.error_category(),
            reauthenticate: error.requires_reauthentication(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for ConsoleError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        ConsoleError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
