// signup-client/src/session_store.rs
use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::TokenStorage;

/// Storage key used when none is configured
pub const DEFAULT_TOKEN_KEY: &str = "authToken";

/// Persists the opaque auth token across client runs.
///
/// Never talks to the network and never inspects the token.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    key: String,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn TokenStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Last saved token; `None` when absent or when storage is unavailable
    pub fn load(&self) -> Option<String> {
        match self.storage.get(&self.key) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Token storage unavailable, starting logged out: {}", e);
                None
            }
        }
    }

    pub fn save(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(&self.key, token).map_err(|e| {
            tracing::warn!("Failed to persist auth token: {}", e);
            e
        })
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key).map_err(|e| {
            tracing::warn!("Failed to clear auth token: {}", e);
            e
        })
    }
}
