//! In-memory page and store, used by tests and the logic-mode tester
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

use thiserror::Error;

use crate::font::Font;
use crate::page::{Control, Page, Target};
use crate::prefs::{BackgroundControl, PreferenceStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("store is read-only (writing `{key}`)")]
    ReadOnly { key: String },
}

/// Shared key/value map. Clones share the same entries, so a clone handed to
/// a fresh controller behaves like storage surviving a page reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Rc::new(RefCell::new(map)),
            read_only: false,
        }
    }

    /// A store that rejects every write.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl PreferenceStore for MemoryStore {
    type Error = MemoryStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.read_only {
            return Err(MemoryStoreError::ReadOnly {
                key: key.to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryPageError {
    #[error("no element for {0:?}")]
    MissingTarget(Target),
    #[error("no control for {0:?}")]
    MissingControl(Control),
}

/// A page model holding class sets per element and checked states per control.
#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: RefCell<BTreeMap<Target, Vec<BTreeSet<String>>>>,
    controls: RefCell<HashMap<Control, bool>>,
}

impl MemoryPage {
    /// The crowdprinter layout: one content node, a body, `blob_count` blobs,
    /// both panels initially hidden with `hidden_class`, every font radio and
    /// both background checkboxes unchecked.
    #[must_use]
    pub fn with_layout(blob_count: usize, hidden_class: &str) -> Self {
        let hidden = BTreeSet::from([hidden_class.to_string()]);
        let elements = BTreeMap::from([
            (Target::Content, vec![BTreeSet::new()]),
            (Target::Body, vec![BTreeSet::new()]),
            (Target::Blobs, vec![BTreeSet::new(); blob_count]),
            (Target::FontPanel, vec![hidden.clone()]),
            (Target::BackgroundPanel, vec![hidden]),
        ]);
        let mut controls: HashMap<Control, bool> = Font::ALL
            .into_iter()
            .map(|font| (Control::FontRadio(font), false))
            .collect();
        controls.insert(Control::Background(BackgroundControl::Grid), false);
        controls.insert(Control::Background(BackgroundControl::Blobs), false);
        Self {
            elements: RefCell::new(elements),
            controls: RefCell::new(controls),
        }
    }

    /// [`Self::with_layout`] using the default hidden class.
    #[must_use]
    pub fn standard(blob_count: usize) -> Self {
        Self::with_layout(blob_count, "display-none")
    }

    /// Drop a target entirely, as if the markup lacked it.
    #[must_use]
    pub fn without(self, target: Target) -> Self {
        self.elements.borrow_mut().remove(&target);
        self
    }

    /// Classes of the first element of `target` (empty when there is none).
    #[must_use]
    pub fn classes(&self, target: Target) -> BTreeSet<String> {
        self.elements
            .borrow()
            .get(&target)
            .and_then(|els| els.first().cloned())
            .unwrap_or_default()
    }

    /// Classes of every element of `target`.
    #[must_use]
    pub fn element_classes(&self, target: Target) -> Vec<BTreeSet<String>> {
        self.elements
            .borrow()
            .get(&target)
            .cloned()
            .unwrap_or_default()
    }

    /// Classes on `target` that start with `prefix`.
    #[must_use]
    pub fn classes_with_prefix(&self, target: Target, prefix: &str) -> BTreeSet<String> {
        self.classes(target)
            .into_iter()
            .filter(|class| class.starts_with(prefix))
            .collect()
    }
}

impl Page for MemoryPage {
    type Error = MemoryPageError;

    fn has_class(&self, target: Target, class: &str) -> Result<bool, Self::Error> {
        self.elements
            .borrow()
            .get(&target)
            .and_then(|els| els.first())
            .map(|el| el.contains(class))
            .ok_or(MemoryPageError::MissingTarget(target))
    }

    fn set_class(&self, target: Target, class: &str, on: bool) -> Result<(), Self::Error> {
        let mut elements = self.elements.borrow_mut();
        let els = elements
            .get_mut(&target)
            .ok_or(MemoryPageError::MissingTarget(target))?;
        for el in els {
            if on {
                el.insert(class.to_string());
            } else {
                el.remove(class);
            }
        }
        Ok(())
    }

    fn checked(&self, control: Control) -> Result<bool, Self::Error> {
        self.controls
            .borrow()
            .get(&control)
            .copied()
            .ok_or(MemoryPageError::MissingControl(control))
    }

    fn set_checked(&self, control: Control, checked: bool) -> Result<(), Self::Error> {
        let mut controls = self.controls.borrow_mut();
        let slot = controls
            .get_mut(&control)
            .ok_or(MemoryPageError::MissingControl(control))?;
        *slot = checked;
        // Radios in one group are mutually exclusive.
        if checked && let Control::FontRadio(selected) = control {
            for font in Font::ALL.into_iter().filter(|font| *font != selected) {
                controls.insert(Control::FontRadio(font), false);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_clones_share_entries() {
        let store = MemoryStore::default();
        let reloaded = store.clone();
        store.set("font", "sans").unwrap();
        assert_eq!(reloaded.get("font").unwrap().as_deref(), Some("sans"));
        assert_eq!(reloaded.len(), 1);
        reloaded.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let store = MemoryStore::read_only();
        let err = store.set("font", "sans").unwrap_err();
        assert_eq!(
            err,
            MemoryStoreError::ReadOnly {
                key: "font".to_string()
            }
        );
    }

    #[test]
    fn class_edits_reach_every_blob() {
        let page = MemoryPage::standard(3);
        page.set_class(Target::Blobs, "display-none", true).unwrap();
        assert!(
            page.element_classes(Target::Blobs)
                .iter()
                .all(|el| el.contains("display-none"))
        );
    }

    #[test]
    fn pages_without_blobs_accept_edits() {
        let page = MemoryPage::standard(0);
        page.set_class(Target::Blobs, "display-none", true).unwrap();
        assert_eq!(
            page.has_class(Target::Blobs, "display-none"),
            Err(MemoryPageError::MissingTarget(Target::Blobs))
        );
    }

    #[test]
    fn radios_are_exclusive() {
        let page = MemoryPage::standard(0);
        page.set_checked(Control::FontRadio(Font::Serif), true).unwrap();
        page.set_checked(Control::FontRadio(Font::Sans), true).unwrap();
        assert!(!page.checked(Control::FontRadio(Font::Serif)).unwrap());
        assert!(page.checked(Control::FontRadio(Font::Sans)).unwrap());
    }
}
