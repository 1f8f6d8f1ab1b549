//! Session token state for the current operator.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client reads the token before every request; the login and
//! register flows write it; logout clears it. Nothing is persisted, so the
//! session ends with the process.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, PoisonError, RwLock};

/// Shared in-memory bearer token slot. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
    slot: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a store already holding `token` (ignored when empty).
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        let store = Self::new();
        if let Some(token) = token {
            store.set(token);
        }
        store
    }

    /// Replace the current token. An empty string clears the session.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = if token.is_empty() { None } else { Some(token) };
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Discard the token (logout).
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
