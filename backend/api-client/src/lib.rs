//! Client-side HTTP access layer for the storefront REST backend.
//!
//! ## Architecture
//!
//! - [`ApiClient`]: typed verbs, bearer token attachment, envelope decoding
//! - [`TokenStore`]: the current access token, shared by every clone
//! - [`RefreshCoordinator`]: single-flight token renewal on expiry
//! - [`Session`] and [`Catalog`]: thin typed wrappers over the endpoints
//!
//! Fallible operations return [`ApiResult`]; nothing here panics on a bad
//! response.

pub mod api_client;
pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod paths;
pub mod refresh;
pub mod session;
pub mod token_store;

#[cfg(test)]
mod tests;

pub use api_client::ApiClient;
pub use catalog::Catalog;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::config::ConfigError;
pub use error::{ApiError, ApiResult};
pub use refresh::RefreshCoordinator;
pub use session::Session;
pub use token_store::{TokenSnapshot, TokenStore};
