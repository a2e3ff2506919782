//! Response envelopes.
//!
//! Every 2xx body is one of three shapes (single item, page, message) and
//! every non-2xx body is an [`ErrorEnvelope`]. `instance` and `timestamp`
//! are informational and default to empty when a server omits them.

use serde::{Deserialize, Serialize};

/// `{ item, instance, timestamp }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub item: T,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub timestamp: String,
}

/// `{ items, page, instance, timestamp }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub page: PageMetadata,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Pagination block of a [`PageEnvelope`]. All fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// `{ message, instance, timestamp }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub message: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Body of any non-2xx response.
///
/// `code` identifies the failure (e.g. `ACCOUNT_107` for an expired token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub instance: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Decoded result of a paginated request: the items plus their page block.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: PageMetadata,
}

impl<T> From<PageEnvelope<T>> for Page<T> {
    fn from(envelope: PageEnvelope<T>) -> Self {
        Self {
            items: envelope.items,
            page: envelope.page,
        }
    }
}
