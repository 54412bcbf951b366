use std::cell::Cell;

use crowdprinter_prefs::PreferenceStore;
use web_sys::Storage;

use crate::dom::js_error_message;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage rejected `{key}`: {message}")]
    Js { key: String, message: String },
}

/// Preference store backed by `window.localStorage`.
///
/// Without a storage handle, reads come back empty and writes are dropped;
/// the page still works for the current visit.
#[derive(Debug, Default)]
pub struct LocalPreferenceStore {
    storage: Option<Storage>,
    warned: Cell<bool>,
}

impl LocalPreferenceStore {
    #[must_use]
    pub const fn new(storage: Option<Storage>) -> Self {
        Self {
            storage,
            warned: Cell::new(false),
        }
    }

    /// Store over the current window's `localStorage`.
    #[must_use]
    pub fn from_window() -> Self {
        Self::new(crate::dom::local_storage())
    }

    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }
}

impl PreferenceStore for LocalPreferenceStore {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let Some(storage) = &self.storage else {
            return Ok(None);
        };
        storage.get_item(key).map_err(|e| StorageError::Js {
            key: key.to_string(),
            message: js_error_message(&e),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let Some(storage) = &self.storage else {
            if !self.warned.replace(true) {
                log::warn!("localStorage unavailable; preferences will not persist");
            }
            return Ok(());
        };
        storage.set_item(key, value).map_err(|e| StorageError::Js {
            key: key.to_string(),
            message: js_error_message(&e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_storage_reads_empty_and_drops_writes() {
        let store = LocalPreferenceStore::new(None);
        assert!(!store.is_persistent());
        store.set("font", "serif").expect("dropped, not failed");
        store.set("font", "sans").expect("dropped, not failed");
        assert!(store.warned.get());
        assert_eq!(store.get("font").expect("read"), None);
    }
}
