//! Key/value persistence
//!
//! Stats and settings are small JSON (or plain string) values stored under
//! fixed keys. The browser build uses LocalStorage; tests and the native demo
//! use `MemoryStorage`. Loads never fail the game: any error yields defaults.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Result type for storage operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum PersistError {
    /// No storage backend (private browsing, blocked cookies, no window).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend rejected the operation (quota, security error).
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Stored payload was not valid JSON for the expected type.
    #[error("malformed stored value: {0}")]
    Parse(#[from] serde_json::Error),
}

/// String key/value store
pub trait Storage {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> PersistResult<()>;
    fn remove_item(&mut self, key: &str) -> PersistResult<()>;
}

/// In-process storage for tests and the native build
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistResult<()> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> PersistResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Load and parse a JSON value, or `None` if absent, unreadable or malformed
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let parsed = storage.get_item(key).and_then(|raw| {
        raw.map(|json| serde_json::from_str(&json).map_err(PersistError::from))
            .transpose()
    });
    match parsed {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Ignoring stored {key}: {err}");
            None
        }
    }
}

/// Serialize and store a JSON value; failures are logged, never propagated
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(PersistError::from)
        .and_then(|json| storage.set_item(key, &json));
    if let Err(err) = result {
        log::warn!("Failed to save {key}: {err}");
    }
}
