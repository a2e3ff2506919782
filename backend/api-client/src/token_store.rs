//! Holder of the current access token.
//!
//! Every outbound request reads it; only login, refresh, and logout write it.
//! Reads go through an `RwLock`, so no reader observes a half-written slot.
//!
//! Each write or clear bumps a generation counter. A request remembers the
//! generation it was sent with; when it comes back rejected, the refresh
//! coordinator compares generations to tell "my token expired" apart from
//! "my token was already replaced while I was in flight".

use common::AccessToken;

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::RwLock;

/// Token and the generation it was written at, read in one step.
#[derive(Debug, Clone)]
pub struct TokenSnapshot {
    pub token: Option<AccessToken>,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct TokenSlot {
    token: Option<AccessToken>,
    generation: u64,
}

/// Shared token holder.
///
/// This type is `Clone`; all clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    slot: Arc<RwLock<TokenSlot>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a token, e.g. one restored by the application.
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            slot: Arc::new(RwLock::new(TokenSlot {
                token: Some(token),
                generation: 1,
            })),
        }
    }

    /// Current token, if any.
    pub async fn get(&self) -> Option<AccessToken> {
        self.slot.read().await.token.clone()
    }

    pub async fn snapshot(&self) -> TokenSnapshot {
        let slot = self.slot.read().await;
        TokenSnapshot {
            token: slot.token.clone(),
            generation: slot.generation,
        }
    }

    pub async fn generation(&self) -> u64 {
        self.slot.read().await.generation
    }

    pub async fn is_authenticated(&self) -> bool {
        self.slot.read().await.token.is_some()
    }

    /// Replace the token. Returns the new generation.
    pub async fn set(&self, token: AccessToken) -> u64 {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        info!(
            "Access token stored ({} chars, generation {})",
            token.len(),
            slot.generation
        );
        slot.token = Some(token);
        slot.generation
    }

    /// Replace the token only if nothing was written since `expected`.
    ///
    /// Returns the new generation, or `None` if the store moved on (a login
    /// or logout landed in between) and was left untouched.
    pub async fn set_if_current(&self, expected: u64, token: AccessToken) -> Option<u64> {
        let mut slot = self.slot.write().await;
        if slot.generation != expected {
            debug!(
                "Token write for generation {expected} skipped, store is at {}",
                slot.generation
            );
            return None;
        }
        slot.generation += 1;
        info!(
            "Access token stored ({} chars, generation {})",
            token.len(),
            slot.generation
        );
        slot.token = Some(token);
        Some(slot.generation)
    }

    /// Drop the token only if nothing was written since `expected`.
    pub async fn clear_if_current(&self, expected: u64) -> Option<u64> {
        let mut slot = self.slot.write().await;
        if slot.generation != expected {
            debug!(
                "Token clear for generation {expected} skipped, store is at {}",
                slot.generation
            );
            return None;
        }
        slot.generation += 1;
        slot.token = None;
        info!("Access token cleared (generation {})", slot.generation);
        Some(slot.generation)
    }

    /// Drop the token. Returns the new generation.
    pub async fn clear(&self) -> u64 {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        if slot.token.take().is_some() {
            info!("Access token cleared (generation {})", slot.generation);
        } else {
            debug!("Clear requested but no access token was stored");
        }
        slot.generation
    }
}
