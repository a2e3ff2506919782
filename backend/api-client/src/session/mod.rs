//! Sign-in, sign-out and the signed-in user's profile.

use crate::api_client::ApiClient;
use crate::error::ApiResult;
use crate::paths::encode_segment;
use crate::refresh::granted_token;

use models::{LoginInput, TokenGrant, UpdateUser, User, UserFinder};

use const_format::concatcp;
use log::{info, warn};

const AUTH: &str = "auth";
pub const LOGIN_PATH: &str = concatcp!(AUTH, "/login");
pub const LOGOUT_PATH: &str = concatcp!(AUTH, "/logout");
pub const CURRENT_USER_PATH: &str = "users/me";

/// Session operations over a borrowed [`ApiClient`].
pub struct Session<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn session(&self) -> Session<'_> {
        Session { client: self }
    }
}

impl<'a> Session<'a> {
    /// Sign in and store the issued access token.
    ///
    /// The refresh token arrives as an HTTP-only cookie and stays in the
    /// client's cookie store.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidInput`](crate::ApiError::InvalidInput) before any
    /// request if the credentials are out of bounds; otherwise whatever the
    /// login call returns. The token store is untouched on failure.
    pub async fn login(&self, input: &LoginInput) -> ApiResult<()> {
        input.validate()?;

        let grant: TokenGrant = self.client.post_data(LOGIN_PATH, input).await?;
        let token = granted_token(grant)?;
        self.client.token_store().set(token).await;

        info!("Signed in as {}", input.username);
        Ok(())
    }

    /// Sign out. The local token is dropped even when the server call fails.
    pub async fn logout(&self) -> ApiResult<String> {
        let outcome = self.client.post_message(LOGOUT_PATH, None::<&()>).await;
        self.client.token_store().clear().await;

        match &outcome {
            Ok(message) => info!("Signed out: {message}"),
            Err(e) => warn!("Sign-out call failed, local session cleared anyway: {e}"),
        }
        outcome
    }

    /// Renew the access token from the refresh cookie.
    ///
    /// Used at start-up to resume a session without asking for credentials.
    pub async fn refresh(&self) -> ApiResult<()> {
        self.client.refresher().refresh_now().await.map(|_| ())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.token_store().is_authenticated().await
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        self.client.get_data(CURRENT_USER_PATH).await
    }

    pub async fn update_user(&self, finder: &UserFinder, update: &UpdateUser) -> ApiResult<User> {
        let (prefix, value) = finder.segments();
        let path = format!("{}/{}", prefix.join("/"), encode_segment(value)?);
        self.client.patch_data(&path, update).await
    }
}
