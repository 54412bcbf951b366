//! The preference controller: keeps controls, presentation classes and the
//! persisted store in step.
use thiserror::Error;

use crate::contract::PageContract;
use crate::font::Font;
use crate::page::{Control, Page, Target};
use crate::prefs::{
    BackgroundChange, BackgroundControl, PreferenceStore, Preferences, flag_str, parse_flag,
};
use crate::presentation::{
    BackgroundPresentation, FontPresentation, background_presentation, font_presentation,
};

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Failure raised by one of the controller's adapters.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("page error: {0}")]
    Page(#[source] BoxedError),
    #[error("storage error: {0}")]
    Store(#[source] BoxedError),
}

impl ControllerError {
    fn page(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Page(Box::new(err))
    }

    fn store(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(err))
    }
}

/// Drives a [`Page`] and a [`PreferenceStore`] from user events.
///
/// The controller holds no preference state of its own: every handler reads
/// the current values from the controls or the store.
pub struct PreferenceController<P, S>
where
    P: Page,
    S: PreferenceStore,
{
    page: P,
    store: S,
    contract: PageContract,
}

impl<P, S> PreferenceController<P, S>
where
    P: Page,
    S: PreferenceStore,
{
    pub const fn new(page: P, store: S, contract: PageContract) -> Self {
        Self {
            page,
            store,
            contract,
        }
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn contract(&self) -> &PageContract {
        &self.contract
    }

    /// Apply stored preferences to the page. Runs once, when the page loads.
    ///
    /// # Errors
    ///
    /// Returns an error if a required element is missing or the store fails.
    pub fn hydrate(&self) -> Result<Preferences, ControllerError> {
        let keys = &self.contract.keys;
        let stored_font = self.store.get(&keys.font).map_err(ControllerError::store)?;
        let font = Font::resolve(stored_font.as_deref());
        let palette = &self.contract.classes;
        self.apply_font_classes(
            &font_presentation(font.as_str(), palette).replacing(stored_font.as_deref(), palette),
        )?;
        log::info!("Previously selected font: {font}");
        self.page
            .set_checked(Control::FontRadio(font), true)
            .map_err(ControllerError::page)?;

        let defaults = Preferences::default();
        let show_grid = self
            .stored_flag(&keys.background_grid)?
            .unwrap_or(defaults.background_grid);
        let show_blobs = self
            .stored_flag(&keys.background_blobs)?
            .unwrap_or(defaults.background_blobs);
        self.page
            .set_checked(Control::Background(BackgroundControl::Grid), show_grid)
            .map_err(ControllerError::page)?;
        self.page
            .set_checked(Control::Background(BackgroundControl::Blobs), show_blobs)
            .map_err(ControllerError::page)?;

        let (background_grid, background_blobs) = self.apply_background(None)?;
        Ok(Preferences {
            font,
            background_grid,
            background_blobs,
        })
    }

    /// Show or hide both menu panels. Each panel flips on its own current state.
    ///
    /// # Errors
    ///
    /// Returns an error if a panel is missing.
    pub fn toggle_accessibility_menu(&self) -> Result<(), ControllerError> {
        let hidden = &self.contract.classes.panel_hidden;
        for panel in [Target::FontPanel, Target::BackgroundPanel] {
            let is_hidden = self
                .page
                .has_class(panel, hidden)
                .map_err(ControllerError::page)?;
            self.page
                .set_class(panel, hidden, !is_hidden)
                .map_err(ControllerError::page)?;
        }
        Ok(())
    }

    /// Switch the content font and persist the choice. Values outside the
    /// known set are applied as-is; their class simply matches no style. The
    /// class of the previously stored value is removed even when it is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the content element is missing or the store fails.
    pub fn apply_font(&self, selected: &str) -> Result<(), ControllerError> {
        log::info!("You selected: {selected}");
        if selected.parse::<Font>().is_err() {
            log::debug!("{selected:?} is not a known font; applying it anyway");
        }
        let keys = &self.contract.keys;
        let previous = self.store.get(&keys.font).map_err(ControllerError::store)?;
        let palette = &self.contract.classes;
        self.apply_font_classes(
            &font_presentation(selected, palette).replacing(previous.as_deref(), palette),
        )?;
        self.store
            .set(&keys.font, selected)
            .map_err(ControllerError::store)
    }

    /// Apply the background checkboxes, overlaid with `change` when a control
    /// just fired, and persist both flags. Returns `(show_grid, show_blobs)`.
    ///
    /// # Errors
    ///
    /// Returns an error if a checkbox is missing or the store fails.
    pub fn apply_background(
        &self,
        change: Option<BackgroundChange>,
    ) -> Result<(bool, bool), ControllerError> {
        let grid = self
            .page
            .checked(Control::Background(BackgroundControl::Grid))
            .map_err(ControllerError::page)?;
        let blobs = self
            .page
            .checked(Control::Background(BackgroundControl::Blobs))
            .map_err(ControllerError::page)?;
        let (show_grid, show_blobs) =
            change.map_or((grid, blobs), |change| change.apply_to(grid, blobs));

        self.apply_background_classes(background_presentation(show_grid, show_blobs))?;

        let keys = &self.contract.keys;
        self.store
            .set(&keys.background_grid, flag_str(show_grid))
            .map_err(ControllerError::store)?;
        self.store
            .set(&keys.background_blobs, flag_str(show_blobs))
            .map_err(ControllerError::store)?;
        Ok((show_grid, show_blobs))
    }

    /// Preferences as currently persisted, with defaults filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn stored_preferences(&self) -> Result<Preferences, ControllerError> {
        Preferences::load(&self.store, &self.contract.keys).map_err(ControllerError::store)
    }

    fn stored_flag(&self, key: &str) -> Result<Option<bool>, ControllerError> {
        let raw = self.store.get(key).map_err(ControllerError::store)?;
        Ok(parse_flag(raw.as_deref()))
    }

    fn apply_font_classes(&self, edit: &FontPresentation) -> Result<(), ControllerError> {
        self.page
            .remove_classes(Target::Content, &edit.remove)
            .map_err(ControllerError::page)?;
        self.page
            .set_class(Target::Content, &edit.add, true)
            .map_err(ControllerError::page)
    }

    fn apply_background_classes(
        &self,
        background: BackgroundPresentation,
    ) -> Result<(), ControllerError> {
        let classes = &self.contract.classes;
        self.page
            .set_class(Target::Blobs, &classes.blob_hidden, background.blobs_hidden)
            .map_err(ControllerError::page)?;
        self.page
            .set_class(Target::Body, &classes.body_grid, background.body_grid)
            .map_err(ControllerError::page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryPage, MemoryStore};

    fn controller() -> PreferenceController<MemoryPage, MemoryStore> {
        PreferenceController::new(
            MemoryPage::standard(2),
            MemoryStore::default(),
            PageContract::default(),
        )
    }

    #[test]
    fn hydrate_on_empty_store_returns_defaults() {
        let ctl = controller();
        assert_eq!(ctl.hydrate().unwrap(), Preferences::default());
        assert!(ctl.page().checked(Control::FontRadio(Font::Ubuntu)).unwrap());
    }

    #[test]
    fn hydrate_persists_resolved_backgrounds() {
        let ctl = controller();
        ctl.hydrate().unwrap();
        assert_eq!(ctl.store().value("background-grid").as_deref(), Some("true"));
        assert_eq!(ctl.store().value("background-blobs").as_deref(), Some("true"));
        assert_eq!(ctl.store().value("font"), None);
    }

    #[test]
    fn unknown_font_is_applied_and_stored() {
        let ctl = controller();
        ctl.hydrate().unwrap();
        ctl.apply_font("Papyrus").unwrap();
        let classes = ctl.page().classes(Target::Content);
        assert!(classes.contains("font-Papyrus"));
        assert!(!classes.contains("font-Ubuntu"));
        assert_eq!(ctl.store().value("font").as_deref(), Some("Papyrus"));
        assert_eq!(ctl.stored_preferences().unwrap().font, Font::Ubuntu);
    }

    fn font_classes(ctl: &PreferenceController<MemoryPage, MemoryStore>) -> Vec<String> {
        ctl.page()
            .classes(Target::Content)
            .into_iter()
            .filter(|class| class.starts_with("font-"))
            .collect()
    }

    #[test]
    fn unknown_font_class_is_replaced_by_next_choice() {
        let ctl = controller();
        ctl.hydrate().unwrap();
        ctl.apply_font("Papyrus").unwrap();
        ctl.apply_font("serif").unwrap();
        assert_eq!(font_classes(&ctl), vec!["font-serif".to_string()]);

        ctl.apply_font("Papyrus").unwrap();
        ctl.apply_font("Comic").unwrap();
        assert_eq!(font_classes(&ctl), vec!["font-Comic".to_string()]);
    }

    #[test]
    fn missing_panel_surfaces_page_error() {
        let page = MemoryPage::standard(0).without(Target::BackgroundPanel);
        let ctl = PreferenceController::new(page, MemoryStore::default(), PageContract::default());
        let err = ctl.toggle_accessibility_menu().unwrap_err();
        assert!(matches!(err, ControllerError::Page(_)));
        assert!(err.to_string().contains("BackgroundPanel"));
    }

    #[test]
    fn failing_store_surfaces_store_error() {
        let ctl = PreferenceController::new(
            MemoryPage::standard(1),
            MemoryStore::read_only(),
            PageContract::default(),
        );
        let err = ctl.apply_font("serif").unwrap_err();
        assert!(matches!(err, ControllerError::Store(_)));
        // The class edit happens before the write.
        assert!(ctl.page().classes(Target::Content).contains("font-serif"));
    }

    #[test]
    fn background_change_without_known_event_uses_checkboxes() {
        let ctl = controller();
        ctl.hydrate().unwrap();
        ctl.page()
            .set_checked(Control::Background(BackgroundControl::Blobs), false)
            .unwrap();
        assert_eq!(ctl.apply_background(None).unwrap(), (true, false));
        assert!(ctl.page().classes(Target::Blobs).contains("display-none"));
    }
}
