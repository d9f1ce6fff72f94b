use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::mode::{Encoding, Mode};

/// Trait for abstracting the persisted key-value slot
/// Platform-specific implementations should provide this
pub trait PreferenceStore {
    type Error: std::error::Error + 'static;

    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write the raw value under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Typed view over one preference slot.
///
/// Storage failures never reach the caller: reads fall back to
/// [`Mode::Standard`] and writes are dropped after a warning.
#[derive(Debug, Clone)]
pub struct Preference<S> {
    store: S,
    key: String,
    encoding: Encoding,
}

impl<S: PreferenceStore> Preference<S> {
    pub fn new(store: S, key: impl Into<String>, encoding: Encoding) -> Self {
        Self {
            store,
            key: key.into(),
            encoding,
        }
    }

    #[must_use]
    pub fn load(&self) -> Mode {
        match self.store.read(&self.key) {
            Ok(Some(raw)) => self.encoding.decode(&raw).unwrap_or_else(|| {
                log::debug!("ignoring unrecognized value {raw:?} under {}", self.key);
                Mode::Standard
            }),
            Ok(None) => Mode::Standard,
            Err(err) => {
                log::warn!("preference {} unavailable: {err}", self.key);
                Mode::Standard
            }
        }
    }

    pub fn save(&self, mode: Mode) {
        if let Err(err) = self.store.write(&self.key, self.encoding.encode(mode)) {
            log::warn!("could not persist preference {}: {err}", self.key);
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("storage disabled")]
    Disabled,
    #[error("quota exceeded writing {key}")]
    QuotaExceeded { key: String },
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory [`PreferenceStore`] for native hosts and tests.
///
/// Clones share the same backing map, so a clone handed to one controller
/// sees what another wrote, the way two page loads share `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        store
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Make subsequent reads fail as if storage were disabled.
    pub fn fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    /// Make subsequent writes fail as if the quota were exhausted.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }
}

impl PreferenceStore for MemoryStore {
    type Error = MemoryStoreError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            return Err(MemoryStoreError::Disabled);
        }
        Ok(inner.values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(MemoryStoreError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        inner.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults_when_slot_is_empty_or_garbage() {
        let store = MemoryStore::new();
        let pref = Preference::new(store.clone(), "siteStyle", Encoding::SiteStyle);
        assert_eq!(pref.load(), Mode::Standard);

        store.write("siteStyle", "high-contrast").unwrap();
        assert_eq!(pref.load(), Mode::Standard);
    }

    #[test]
    fn save_then_load_uses_encoding_vocabulary() {
        let store = MemoryStore::new();
        let pref = Preference::new(store.clone(), "accessibilityMode", Encoding::AccessibilityMode);
        pref.save(Mode::Accessibility);
        assert_eq!(store.get("accessibilityMode").as_deref(), Some("enabled"));
        assert_eq!(pref.load(), Mode::Accessibility);
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let store = MemoryStore::with_value("siteStyle", "accessibility");
        let pref = Preference::new(store.clone(), "siteStyle", Encoding::SiteStyle);

        store.fail_reads(true);
        assert_eq!(pref.load(), Mode::Standard);
        store.fail_reads(false);

        store.fail_writes(true);
        pref.save(Mode::Standard);
        assert_eq!(store.get("siteStyle").as_deref(), Some("accessibility"));
    }
}
