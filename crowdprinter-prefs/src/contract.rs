//! Page contract: the element ids, selectors, storage keys and class names the
//! controller relies on. Defaults match the crowdprinter page templates.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::font::Font;

/// Errors raised when a page contract is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("storage keys must be distinct (`{key}` is used twice)")]
    DuplicateKey { key: String },
    #[error("invalid page contract JSON: {0}")]
    Json(String),
}

/// Keys used in the persisted store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub font: String,
    pub background_grid: String,
    pub background_blobs: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            font: "font".to_string(),
            background_grid: "background-grid".to_string(),
            background_blobs: "background-blobs".to_string(),
        }
    }
}

/// Class names the controller reads or toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassPalette {
    /// Marks the element(s) whose font is switched.
    pub content_marker: String,
    /// Marks decorative blob elements.
    pub blob_marker: String,
    pub font_prefix: String,
    pub panel_hidden: String,
    pub blob_hidden: String,
    /// Applied to `<body>` while the grid background is shown.
    pub body_grid: String,
}

impl ClassPalette {
    /// Presentation class for a font identifier. Unknown identifiers still
    /// produce a class; it just matches no stylesheet rule.
    #[must_use]
    pub fn font_class(&self, font_id: &str) -> String {
        format!("{}{font_id}", self.font_prefix)
    }

    /// Classes for every known font, in menu order.
    #[must_use]
    pub fn known_font_classes(&self) -> Vec<String> {
        Font::ALL
            .iter()
            .map(|font| self.font_class(font.as_str()))
            .collect()
    }
}

impl Default for ClassPalette {
    fn default() -> Self {
        Self {
            content_marker: "fontchange".to_string(),
            blob_marker: "blobs".to_string(),
            font_prefix: "font-".to_string(),
            panel_hidden: "display-none".to_string(),
            blob_hidden: "display-none".to_string(),
            body_grid: "background-grid".to_string(),
        }
    }
}

/// Everything the controller assumes about the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContract {
    pub font_panel_id: String,
    pub background_panel_id: String,
    pub grid_control_id: String,
    pub blobs_control_id: String,
    pub menu_button_selector: String,
    /// Font radio inputs are looked up as `<prefix><font id>`.
    pub font_radio_prefix: String,
    pub no_js_selector: String,
    pub js_selector: String,
    pub keys: StorageKeys,
    pub classes: ClassPalette,
}

impl Default for PageContract {
    fn default() -> Self {
        Self {
            font_panel_id: "font-selection".to_string(),
            background_panel_id: "background-selection".to_string(),
            grid_control_id: "background-grid".to_string(),
            blobs_control_id: "background-blobs".to_string(),
            menu_button_selector: "#accessibility-options button".to_string(),
            font_radio_prefix: "font-".to_string(),
            no_js_selector: ".no-js".to_string(),
            js_selector: ".js".to_string(),
            keys: StorageKeys::default(),
            classes: ClassPalette::default(),
        }
    }
}

impl PageContract {
    /// Parse a contract from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let contract: Self =
            serde_json::from_str(json).map_err(|e| ContractError::Json(e.to_string()))?;
        contract.validate()?;
        Ok(contract)
    }

    /// Id of the radio input for `font_id`.
    #[must_use]
    pub fn font_radio_id(&self, font_id: &str) -> String {
        format!("{}{font_id}", self.font_radio_prefix)
    }

    /// Check that every id, selector, key and class is non-empty and that the
    /// storage keys do not collide.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ContractError> {
        let required = [
            ("font_panel_id", &self.font_panel_id),
            ("background_panel_id", &self.background_panel_id),
            ("grid_control_id", &self.grid_control_id),
            ("blobs_control_id", &self.blobs_control_id),
            ("menu_button_selector", &self.menu_button_selector),
            ("no_js_selector", &self.no_js_selector),
            ("js_selector", &self.js_selector),
            ("keys.font", &self.keys.font),
            ("keys.background_grid", &self.keys.background_grid),
            ("keys.background_blobs", &self.keys.background_blobs),
            ("classes.content_marker", &self.classes.content_marker),
            ("classes.blob_marker", &self.classes.blob_marker),
            ("classes.font_prefix", &self.classes.font_prefix),
            ("classes.panel_hidden", &self.classes.panel_hidden),
            ("classes.blob_hidden", &self.classes.blob_hidden),
            ("classes.body_grid", &self.classes.body_grid),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ContractError::Empty { field });
        }

        let keys = [
            &self.keys.font,
            &self.keys.background_grid,
            &self.keys.background_blobs,
        ];
        for (idx, key) in keys.iter().enumerate() {
            if keys[idx + 1..].contains(key) {
                return Err(ContractError::DuplicateKey {
                    key: (*key).clone(),
                });
            }
        }
        Ok(())
    }
}
