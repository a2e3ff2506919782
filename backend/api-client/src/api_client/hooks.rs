//! Request and response hooks shared by the client and the refresh call.

use common::{AccessToken, HttpStatusCode};
use models::ErrorEnvelope;

use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Attach `Authorization: Bearer <token>` when a token is present.
///
/// No token means no header at all, never an empty one.
pub(crate) fn attach_auth(request: RequestBuilder, token: Option<&AccessToken>) -> RequestBuilder {
    match token {
        Some(token) => request.header(AUTHORIZATION, token.bearer()),
        None => request,
    }
}

pub(crate) fn attach_json_content_type(request: RequestBuilder) -> RequestBuilder {
    request.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
}

/// 401 carrying the configured expiry code.
///
/// Any other 401 (bad credentials, revoked account) is an ordinary HTTP error.
pub(crate) fn is_auth_expired(
    status: HttpStatusCode,
    envelope: Option<&ErrorEnvelope>,
    expired_code: &str,
) -> bool {
    status.is_unauthorized() && envelope.is_some_and(|envelope| envelope.code == expired_code)
}
