//! `localStorage` implementation of the key/value capability.
//!
//! Storage can be missing (no window), disabled (privacy modes raise a
//! `SecurityError` on access), or full; all of those surface as
//! [`StoreError`] values the engine already degrades on.

use halloweenify::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Browser-backed [`KeyValueStore`] over `window.localStorage`.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// Creates the adapter. The storage handle is re-fetched per call, so
    /// a storage area that appears or disappears mid-session is picked up.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_owned()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable(
                "localStorage not present".to_owned(),
            )),
            Err(err) => Err(StoreError::Unavailable(describe(&err))),
        }
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StoreError::Backend(describe(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Backend(describe(&err)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| StoreError::Backend(describe(&err)))
    }
}
