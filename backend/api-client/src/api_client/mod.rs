pub(crate) mod hooks;

use crate::config::ClientConfig;
use crate::envelope::{decode_data, decode_error, decode_message, decode_page};
use crate::error::config::ConfigError;
use crate::error::{ApiError, ApiResult};
use crate::refresh::RefreshCoordinator;
use crate::token_store::TokenStore;

use common::{AccessToken, ErrorLocation, HttpStatusCode};
use models::{Blob, Page};

use std::panic::Location;
use std::sync::Arc;

use hooks::{attach_auth, attach_json_content_type, is_auth_expired};
use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Whether a request expects an enveloped JSON body back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Payload {
    Json,
    Binary,
}

/// Outcome of the response hook for one attempt.
enum Inspected {
    Success(Response),
    Expired(String),
}

/// HTTP access to the storefront API.
///
/// Every verb attaches the current bearer token, decodes the response
/// envelope, and recovers from an expired token by refreshing once and
/// retrying once. Failures come back as [`ApiError`], never as panics.
///
/// Cheap to clone; clones share the token store and refresh state.
#[derive(Clone)]
pub struct ApiClient {
    api_root: Url,
    http: Client,
    tokens: TokenStore,
    refresher: RefreshCoordinator,
    auth_expired_code: Arc<str>,
}

impl ApiClient {
    /// Client with a fresh, empty token store.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::with_token_store(config, TokenStore::new())
    }

    /// Client sharing an existing token store.
    pub fn with_token_store(config: &ClientConfig, tokens: TokenStore) -> Result<Self, ConfigError> {
        config.validate()?;
        let api_root = config.api_root()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .cookie_store(config.with_credentials)
            .build()
            .map_err(|e| ConfigError::ClientBuild {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        let refresh_url = join_under(&api_root, &config.refresh_path).map_err(|e| {
            ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid refresh_path: {e}"),
            }
        })?;

        let refresher = RefreshCoordinator::new(http.clone(), refresh_url, tokens.clone());

        Ok(Self {
            api_root,
            http,
            tokens,
            refresher,
            auth_expired_code: Arc::from(config.auth_expired_code.as_str()),
        })
    }

    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.refresher
    }

    /// Resolve a request path under the API root.
    ///
    /// `"/brands"` and `"brands"` resolve to the same URL.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidPath`] for absolute URLs or paths that
    /// would escape the API root.
    pub fn resolve(&self, path: &str) -> ApiResult<Url> {
        join_under(&self.api_root, path)
    }

    // ============================================
    // VERBS
    // ============================================

    /// GET a single item.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(Method::GET, path, None, Payload::Json).await?;
        decode_data(&response.bytes().await?)
    }

    /// GET a page of items.
    pub async fn get_page_data<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Page<T>> {
        let response = self.execute(Method::GET, path, None, Payload::Json).await?;
        decode_page(&response.bytes().await?)
    }

    /// GET raw bytes with their content type. No envelope.
    pub async fn get_blob(&self, path: &str) -> ApiResult<Blob> {
        let response = self.execute(Method::GET, path, None, Payload::Binary).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;

        Ok(Blob::new(bytes.to_vec(), content_type))
    }

    /// POST a body, decode a single item.
    pub async fn post_data<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        let response = self
            .execute(Method::POST, path, Some(body), Payload::Json)
            .await?;
        decode_data(&response.bytes().await?)
    }

    /// PATCH a body, decode a single item.
    pub async fn patch_data<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode(body)?;
        let response = self
            .execute(Method::PATCH, path, Some(body), Payload::Json)
            .await?;
        decode_data(&response.bytes().await?)
    }

    /// DELETE, decode the server message.
    pub async fn delete_message(&self, path: &str) -> ApiResult<String> {
        let response = self
            .execute(Method::DELETE, path, None, Payload::Json)
            .await?;
        decode_message(&response.bytes().await?)
    }

    /// POST with an optional body, decode the server message.
    pub async fn post_message<B>(&self, path: &str, body: Option<&B>) -> ApiResult<String>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(encode).transpose()?;
        let response = self.execute(Method::POST, path, body, Payload::Json).await?;
        decode_message(&response.bytes().await?)
    }

    /// PATCH with an optional body, decode the server message.
    pub async fn patch_message<B>(&self, path: &str, body: Option<&B>) -> ApiResult<String>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(encode).transpose()?;
        let response = self
            .execute(Method::PATCH, path, body, Payload::Json)
            .await?;
        decode_message(&response.bytes().await?)
    }

    // ============================================
    // PIPELINE
    // ============================================

    /// Send, and on an expired token refresh once and retry once.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        payload: Payload,
    ) -> ApiResult<Response> {
        let url = self.resolve(path)?;
        let snapshot = self.tokens.snapshot().await;

        let response = self
            .send(&method, &url, body.as_deref(), payload, snapshot.token.as_ref())
            .await?;

        let code = match self.inspect(response).await? {
            Inspected::Success(response) => return Ok(response),
            Inspected::Expired(code) => code,
        };

        debug!("{method} {url} rejected with {code}, refreshing token");
        let token = self.refresher.ensure_refreshed(snapshot.generation).await?;

        let retry = self
            .send(&method, &url, body.as_deref(), payload, Some(&token))
            .await?;

        match self.inspect(retry).await? {
            Inspected::Success(response) => Ok(response),
            Inspected::Expired(code) => {
                warn!("{method} {url} still rejected with {code} after refresh, giving up");
                Err(ApiError::auth_expired(code))
            }
        }
    }

    async fn send(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&[u8]>,
        payload: Payload,
        token: Option<&AccessToken>,
    ) -> ApiResult<Response> {
        let mut request = attach_auth(self.http.request(method.clone(), url.clone()), token);

        if payload == Payload::Json {
            request = attach_json_content_type(request);
        }
        if let Some(body) = body {
            request = request.body(body.to_vec());
        }

        debug!("{method} {url}");
        Ok(request.send().await?)
    }

    /// Response hook: pass 2xx through, flag the expiry signal, turn every
    /// other status into [`ApiError::Http`].
    async fn inspect(&self, response: Response) -> ApiResult<Inspected> {
        let status = HttpStatusCode(response.status().as_u16());
        if status.is_success() {
            return Ok(Inspected::Success(response));
        }

        let body = response.bytes().await?;
        let envelope = decode_error(&body);

        if is_auth_expired(status, envelope.as_ref(), &self.auth_expired_code) {
            let code = envelope.map(|e| e.code).unwrap_or_default();
            return Ok(Inspected::Expired(code));
        }

        let error =
            ApiError::from_http_response(status.0, envelope, String::from_utf8_lossy(&body));
        debug!("Request failed ({}): {}", error.error_category(), error);
        Err(error)
    }
}

#[track_caller]
fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| ApiError::Encode {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Join `path` under `root`, refusing anything that lands outside it.
fn join_under(root: &Url, path: &str) -> ApiResult<Url> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_path(path, "path is empty"));
    }
    if trimmed.starts_with("//") {
        return Err(ApiError::invalid_path(path, "scheme-relative URLs are not allowed"));
    }

    let url = root
        .join(trimmed.trim_start_matches('/'))
        .map_err(|e| ApiError::invalid_path(path, e.to_string()))?;

    if !url.as_str().starts_with(root.as_str()) {
        return Err(ApiError::invalid_path(
            path,
            format!("resolves outside the API root {root}"),
        ));
    }

    Ok(url)
}
