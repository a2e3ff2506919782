//! Building request paths from untrusted values.

use crate::error::{ApiError, ApiResult};

use url::form_urlencoded;

/// Percent-encode one path segment, so `/`, `?` and `#` in a value can
/// never change which endpoint is addressed.
///
/// # Errors
///
/// [`ApiError::InvalidPath`] for an empty value, `.` or `..`. URL parsing
/// folds those segments (escaped or not) into the surrounding path.
#[track_caller]
pub fn encode_segment(value: &str) -> ApiResult<String> {
    if matches!(value, "" | "." | "..") {
        return Err(ApiError::invalid_path(
            value,
            "path value cannot be empty, '.' or '..'",
        ));
    }

    Ok(form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20"))
}

/// `path?k1=v1&k2=v2` with every pair form-encoded.
pub fn with_query<'a, I>(path: &str, pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
