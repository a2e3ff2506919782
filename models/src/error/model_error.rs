use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Local validation failure of a request model, raised before any I/O.
#[derive(Debug, Clone, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {field}: {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ModelError::Validation { field, .. } => field,
        }
    }
}
