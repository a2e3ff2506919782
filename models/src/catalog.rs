//! Catalog records.
//!
//! These are pass-through shapes: the access layer applies no business
//! rules to them. Fields the application reads are typed; anything else
//! the server sends lands in `extra` so re-serializing a record reproduces
//! what was received.

use crate::blob::Blob;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            count: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub specifications: Map<String, Value>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub images_uuid: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub uuid: String,
    #[serde(default)]
    pub full_name: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub object_key: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How to look up a product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFinder {
    Category(String),
    Brand(String),
    Name(String),
}

impl ProductFinder {
    /// The value being searched for.
    pub fn value(&self) -> &str {
        match self {
            ProductFinder::Category(v) | ProductFinder::Brand(v) | ProductFinder::Name(v) => v,
        }
    }
}

/// Image bytes with the metadata stored alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub blob: Blob,
    pub metadata: ImageMetadata,
}
