//! Response envelope decoding.
//!
//! Pure functions, one per envelope kind. Each one checks that the payload
//! field is present and of the right JSON kind before handing the body to
//! serde, so a missing `item` reads as "missing required field 'item'"
//! instead of a generic serde message. Unknown fields are ignored.

use crate::error::{ApiError, ApiResult};

use models::{DataEnvelope, ErrorEnvelope, MessageEnvelope, Page, PageEnvelope};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const ITEM_FIELD: &str = "item";
const ITEMS_FIELD: &str = "items";
const PAGE_FIELD: &str = "page";
const MESSAGE_FIELD: &str = "message";
const CODE_FIELD: &str = "code";

/// Decode `{ item }` and return the item.
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let object = parse_object(body)?;

    match object.get(ITEM_FIELD) {
        None => return Err(missing(ITEM_FIELD)),
        Some(Value::Null) => return Err(ApiError::decode("required field 'item' is null")),
        Some(_) => {}
    }

    let envelope: DataEnvelope<T> = serde_json::from_value(Value::Object(object))
        .map_err(|e| ApiError::decode(format!("malformed data envelope: {e}")))?;

    Ok(envelope.item)
}

/// Decode `{ items, page }`.
pub fn decode_page<T: DeserializeOwned>(body: &[u8]) -> ApiResult<Page<T>> {
    let object = parse_object(body)?;

    match object.get(ITEMS_FIELD) {
        None => return Err(missing(ITEMS_FIELD)),
        Some(Value::Array(_)) => {}
        Some(other) => return Err(wrong_kind(ITEMS_FIELD, "an array", other)),
    }

    match object.get(PAGE_FIELD) {
        None => return Err(missing(PAGE_FIELD)),
        Some(Value::Object(_)) => {}
        Some(other) => return Err(wrong_kind(PAGE_FIELD, "an object", other)),
    }

    let envelope: PageEnvelope<T> = serde_json::from_value(Value::Object(object))
        .map_err(|e| ApiError::decode(format!("malformed page envelope: {e}")))?;

    Ok(envelope.into())
}

/// Decode `{ message }` and return the message.
pub fn decode_message(body: &[u8]) -> ApiResult<String> {
    let object = parse_object(body)?;

    match object.get(MESSAGE_FIELD) {
        None => return Err(missing(MESSAGE_FIELD)),
        Some(Value::String(_)) => {}
        Some(other) => return Err(wrong_kind(MESSAGE_FIELD, "a string", other)),
    }

    let envelope: MessageEnvelope = serde_json::from_value(Value::Object(object))
        .map_err(|e| ApiError::decode(format!("malformed message envelope: {e}")))?;

    Ok(envelope.message)
}

/// Read the error envelope of a non-2xx body.
///
/// Lenient: proxies and load balancers answer with HTML or empty bodies, so
/// anything without a string `code` yields `None` rather than an error.
pub fn decode_error(body: &[u8]) -> Option<ErrorEnvelope> {
    let object = parse_object(body).ok()?;

    if !matches!(object.get(CODE_FIELD), Some(Value::String(_))) {
        return None;
    }

    serde_json::from_value(Value::Object(object)).ok()
}

fn parse_object(body: &[u8]) -> ApiResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::decode("response body is empty"));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::decode(format!("response body is not valid JSON: {e}")))?;

    match value {
        Value::Object(object) => Ok(object),
        other => Err(ApiError::decode(format!(
            "response body must be a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

#[track_caller]
fn missing(field: &str) -> ApiError {
    ApiError::decode(format!("missing required field '{field}'"))
}

#[track_caller]
fn wrong_kind(field: &str, expected: &str, actual: &Value) -> ApiError {
    ApiError::decode(format!(
        "field '{field}' must be {expected}, got {}",
        kind_of(actual)
    ))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
