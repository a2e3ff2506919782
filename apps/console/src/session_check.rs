//! Sign in, read the profile, sign out.

use crate::error::ConsoleError;

use api_client::ApiClient;
use common::ErrorLocation;
use models::{LoginInput, User};

use std::env;
use std::panic::Location;

use log::{info, warn};

pub const ENV_USERNAME: &str = "STOREFRONT_USERNAME";
pub const ENV_PASSWORD: &str = "STOREFRONT_PASSWORD";

/// What one session check observed.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub user: User,
    pub logout_message: String,
}

/// Read credentials from `STOREFRONT_USERNAME` / `STOREFRONT_PASSWORD`.
#[track_caller]
pub fn credentials_from_env() -> Result<LoginInput, ConsoleError> {
    let username = required_env(ENV_USERNAME)?;
    let password = required_env(ENV_PASSWORD)?;
    Ok(LoginInput::new(username, password))
}

#[track_caller]
fn required_env(variable: &'static str) -> Result<String, ConsoleError> {
    match env::var(variable) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConsoleError::MissingCredentials {
            variable,
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Log in, fetch `users/me`, log out.
///
/// Logout runs even when the profile fetch fails, so a check never leaves a
/// session behind. The profile error wins over a logout error.
pub async fn run(client: &ApiClient, credentials: &LoginInput) -> Result<SessionReport, ConsoleError> {
    let session = client.session();

    session.login(credentials).await?;
    let user = session.current_user().await;
    let logout = session.logout().await;

    let user = user?;
    info!("Profile read for {} ({} roles)", user.username, user.roles.len());

    let logout_message = match logout {
        Ok(message) => message,
        Err(e) => {
            warn!("Logout failed after a successful check: {e}");
            return Err(e.into());
        }
    };

    Ok(SessionReport {
        user,
        logout_message,
    })
}
