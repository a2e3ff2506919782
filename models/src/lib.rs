//! Wire shapes for the storefront REST backend.
//!
//! This crate holds pure data: the response envelopes every endpoint
//! wraps its payload in, the auth payloads, and the user and catalog
//! records the application passes through unchanged.
//!
//! ## Architecture
//!
//! - **common**: error location, status codes, the access token secret
//! - **models** (this crate): envelopes and records
//! - **api-client**: transport, refresh coordination, envelope decoding
//! - **storefront-console**: wiring for a command-line session

pub mod auth;
pub mod blob;
pub mod catalog;
pub mod envelope;
pub mod error;
pub mod user;

#[cfg(test)]
mod tests;

pub use auth::{LoginInput, TokenGrant};
pub use blob::Blob;
pub use catalog::{Brand, Category, Image, ImageMetadata, Product, ProductFinder, Review};
pub use envelope::{DataEnvelope, ErrorEnvelope, MessageEnvelope, Page, PageEnvelope, PageMetadata};
pub use error::model_error::ModelError;
pub use user::{UpdateUser, User, UserFinder};
