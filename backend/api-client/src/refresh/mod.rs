//! Single-flight access token renewal.
//!
//! # State machine
//!
//! `Idle -> Refreshing -> Idle`, shared by every clone of the client.
//!
//! - A rejected request calls [`RefreshCoordinator::ensure_refreshed`] with
//!   the token generation it was sent with.
//! - `Refreshing`: the caller joins the renewal already in flight and gets
//!   its outcome. No second call to the refresh endpoint is made.
//! - `Idle` and the store has moved past the caller's generation: someone
//!   else already renewed (or ended) the session after this request left.
//!   The caller gets the current token, or `RefreshFailed` if the store is
//!   empty, without touching the network.
//! - `Idle` otherwise: start a renewal. Success stores the new token;
//!   failure clears the store. Neither write happens if a login or logout
//!   moved the store while the renewal was in flight. Either way the state
//!   returns to `Idle` before any waiter sees the outcome.
//!
//! The in-flight renewal is a [`Shared`] future. The state mutex is only
//! held to inspect or swap the state, never across the refresh I/O.

use crate::api_client::hooks::{attach_auth, attach_json_content_type};
use crate::envelope::decode_data;
use crate::error::{ApiError, ApiResult};
use crate::token_store::TokenStore;

use common::{AccessToken, HttpStatusCode};
use models::TokenGrant;

use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use log::{debug, info, warn};
use reqwest::Client;
use tokio::sync::Mutex;
use url::Url;

type RefreshOutcome = ApiResult<AccessToken>;
type InFlightRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

enum RefreshState {
    Idle,
    Refreshing(InFlightRefresh),
}

/// The refresh endpoint call. Bypasses the client's response hook so a
/// rejected refresh can never trigger another refresh.
struct RefreshEndpoint {
    http: Client,
    url: Url,
}

impl RefreshEndpoint {
    async fn call(&self, tokens: &TokenStore) -> RefreshOutcome {
        let current = tokens.get().await;
        let request = attach_json_content_type(attach_auth(
            self.http.get(self.url.clone()),
            current.as_ref(),
        ));

        let response = request.send().await?;
        let status = HttpStatusCode(response.status().as_u16());
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::refresh_failed(
                format!(
                    "refresh endpoint answered HTTP {status} - {}",
                    String::from_utf8_lossy(&body)
                ),
                Some(status),
            ));
        }

        granted_token(decode_data(&body)?)
    }
}

/// The token of a login or refresh grant. An empty token would be sent as
/// `Authorization: Bearer ` on every later request, so it is a decode error.
#[track_caller]
pub(crate) fn granted_token(grant: TokenGrant) -> ApiResult<AccessToken> {
    if grant.access_token.is_empty() {
        return Err(ApiError::decode("grant carried an empty accessToken"));
    }
    Ok(grant.access_token)
}

/// Coordinates token renewal across concurrent requests.
///
/// This type is `Clone`; all clones share the same state and token store.
#[derive(Clone)]
pub struct RefreshCoordinator {
    state: Arc<Mutex<RefreshState>>,
    tokens: TokenStore,
    endpoint: Arc<RefreshEndpoint>,
}

impl RefreshCoordinator {
    pub(crate) fn new(http: Client, url: Url, tokens: TokenStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(RefreshState::Idle)),
            tokens,
            endpoint: Arc::new(RefreshEndpoint { http, url }),
        }
    }

    /// True while a renewal is in flight.
    pub async fn is_refreshing(&self) -> bool {
        matches!(*self.state.lock().await, RefreshState::Refreshing(_))
    }

    /// Renew for a request that was sent at `observed_generation` and
    /// rejected as expired.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RefreshFailed`] if the renewal fails or the
    /// session was ended while the request was in flight.
    pub async fn ensure_refreshed(&self, observed_generation: u64) -> RefreshOutcome {
        let in_flight = {
            let mut state = self.state.lock().await;

            let joined = match &*state {
                RefreshState::Refreshing(in_flight) => Some(in_flight.clone()),
                RefreshState::Idle => None,
            };

            match joined {
                Some(in_flight) => {
                    debug!("Joining in-flight token refresh");
                    in_flight
                }
                None => {
                    let snapshot = self.tokens.snapshot().await;

                    if snapshot.generation != observed_generation {
                        debug!(
                            "Token moved from generation {observed_generation} to {} while request was in flight",
                            snapshot.generation
                        );
                        return snapshot.token.ok_or_else(|| {
                            ApiError::refresh_failed(
                                "session ended while the request was in flight",
                                None,
                            )
                        });
                    }

                    let in_flight = self.start_refresh(snapshot.generation);
                    *state = RefreshState::Refreshing(in_flight.clone());
                    in_flight
                }
            }
        };

        in_flight.await
    }

    /// Renew unconditionally (joining a renewal already in flight).
    ///
    /// Used to restore a session from the refresh cookie on start-up.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        let generation = self.tokens.generation().await;
        self.ensure_refreshed(generation).await
    }

    /// Renewal for the store as it was at `started_at`. The outcome is only
    /// written back if no login or logout moved the store meanwhile.
    fn start_refresh(&self, started_at: u64) -> InFlightRefresh {
        let state = Arc::clone(&self.state);
        let tokens = self.tokens.clone();
        let endpoint = Arc::clone(&self.endpoint);

        info!("Starting token refresh: {}", endpoint.url);

        async move {
            let outcome = match endpoint.call(&tokens).await {
                Ok(token) => {
                    match tokens.set_if_current(started_at, token.clone()).await {
                        Some(_) => info!("Token refresh succeeded"),
                        None => info!("Token refresh succeeded, newer session token kept"),
                    }
                    Ok(token)
                }
                Err(e) => {
                    match tokens.clear_if_current(started_at).await {
                        Some(_) => warn!(
                            "Token refresh failed ({}), session cleared: {}",
                            e.error_category(),
                            e
                        ),
                        None => warn!(
                            "Token refresh failed ({}), newer session token kept: {}",
                            e.error_category(),
                            e
                        ),
                    }
                    Err(e.into_refresh_failure())
                }
            };

            *state.lock().await = RefreshState::Idle;
            outcome
        }
        .boxed()
        .shared()
    }
}
