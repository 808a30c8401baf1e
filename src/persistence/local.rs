//! Browser LocalStorage backend

use super::{PersistError, PersistResult, Storage};

/// `window.localStorage`, resolved once at startup
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Fails with `Unavailable` when there is no window or storage is blocked
    pub fn open() -> PersistResult<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)?;
        Ok(Self { inner })
    }
}

fn backend_error(err: wasm_bindgen::JsValue) -> PersistError {
    PersistError::Backend(format!("{err:?}"))
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> PersistResult<Option<String>> {
        self.inner.get_item(key).map_err(backend_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> PersistResult<()> {
        self.inner.set_item(key, value).map_err(backend_error)
    }

    fn remove_item(&mut self, key: &str) -> PersistResult<()> {
        self.inner.remove_item(key).map_err(backend_error)
    }
}
