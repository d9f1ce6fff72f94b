//! `localStorage`-backed preference store.

use modeswitch_core::PreferenceStore;

use crate::dom;

/// Web-specific preference storage using localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct WebPreferenceStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable")]
    Unavailable,
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PreferenceStore for WebPreferenceStore {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = dom::local_storage().ok_or(WebStorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = dom::local_storage().ok_or(WebStorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }
}
