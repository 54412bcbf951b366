//! Preference values and their persisted string form
use serde::{Deserialize, Serialize};

use crate::contract::StorageKeys;
use crate::font::Font;

/// Trait for abstracting the persisted key/value store.
/// Platform-specific implementations should provide this.
pub trait PreferenceStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// Snapshot of every preference the widget manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub font: Font,
    pub background_grid: bool,
    pub background_blobs: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font: Font::default(),
            background_grid: true,
            background_blobs: true,
        }
    }
}

impl Preferences {
    /// Read all preferences from `store`, substituting defaults for absent or
    /// unrecognised values.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load<S: PreferenceStore>(store: &S, keys: &StorageKeys) -> Result<Self, S::Error> {
        let defaults = Self::default();
        Ok(Self {
            font: Font::resolve(store.get(&keys.font)?.as_deref()),
            background_grid: parse_flag(store.get(&keys.background_grid)?.as_deref())
                .unwrap_or(defaults.background_grid),
            background_blobs: parse_flag(store.get(&keys.background_blobs)?.as_deref())
                .unwrap_or(defaults.background_blobs),
        })
    }
}

/// Parse a stored boolean. Only the exact strings `"true"` and `"false"` are
/// recognised; anything else (including absence) yields `None`.
#[must_use]
pub fn parse_flag(stored: Option<&str>) -> Option<bool> {
    match stored {
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => {
            log::warn!("Ignoring unrecognised stored flag {other:?}");
            None
        }
        None => None,
    }
}

/// String form written to the store for a boolean preference.
#[must_use]
pub const fn flag_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// The two background checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundControl {
    Grid,
    Blobs,
}

/// A change reported by one of the background checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundChange {
    pub control: BackgroundControl,
    pub checked: bool,
}

impl BackgroundChange {
    #[must_use]
    pub const fn new(control: BackgroundControl, checked: bool) -> Self {
        Self { control, checked }
    }

    /// Build a change from the id of the control that fired it. Returns
    /// `None` for ids that are not background controls.
    #[must_use]
    pub fn from_control_id(
        id: &str,
        checked: bool,
        grid_id: &str,
        blobs_id: &str,
    ) -> Option<Self> {
        let control = if id == grid_id {
            BackgroundControl::Grid
        } else if id == blobs_id {
            BackgroundControl::Blobs
        } else {
            return None;
        };
        Some(Self::new(control, checked))
    }

    /// Overlay this change on the current checkbox states.
    #[must_use]
    pub const fn apply_to(self, show_grid: bool, show_blobs: bool) -> (bool, bool) {
        match self.control {
            BackgroundControl::Grid => (self.checked, show_blobs),
            BackgroundControl::Blobs => (show_grid, self.checked),
        }
    }
}
