//! Shared building blocks for the storefront access layer.
//!
//! Types here have no knowledge of HTTP transports or envelopes. They are
//! the vocabulary every other crate in the workspace speaks:
//!
//! - [`ErrorLocation`]: `file:line:column` captured at error construction
//! - [`HttpStatusCode`]: status classification for error handling
//! - [`AccessToken`]: bearer credential that never leaks into logs

pub mod access_token;
pub mod error;
pub mod http_status;

#[cfg(test)]
mod tests;

pub use access_token::AccessToken;
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
