//! Wires the preference controller to the page's events
use std::rc::Rc;

use crowdprinter_prefs::{BackgroundChange, ControllerError, PageContract, PreferenceController};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlInputElement, Window};

use crate::dom::{self, DomError};
use crate::nojs;
use crate::page::DomPage;
use crate::storage::LocalPreferenceStore;

/// Id of an optional `<script type="application/json">` holding a
/// [`PageContract`] override.
pub const CONTRACT_ELEMENT_ID: &str = "a11y-prefs-contract";

pub type WebController = PreferenceController<DomPage, LocalPreferenceStore>;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Contract(#[from] crowdprinter_prefs::ContractError),
}

/// Contract from the page's override element, or the default when absent.
///
/// # Errors
/// Returns an error if the override is present but invalid.
pub fn page_contract(document: &Document) -> Result<PageContract, InstallError> {
    match document.get_element_by_id(CONTRACT_ELEMENT_ID) {
        Some(el) => {
            let json = el.text_content().unwrap_or_default();
            Ok(PageContract::from_json(&json)?)
        }
        None => Ok(PageContract::default()),
    }
}

/// Attach the menu, font and background listeners and hydrate once the page
/// has loaded. Returns the shared controller.
///
/// # Errors
/// Returns an error if the contract is invalid or a listener target is missing.
pub fn install(contract: PageContract) -> Result<Rc<WebController>, InstallError> {
    contract.validate()?;
    let window = dom::window()?;
    let document = dom::document()?;

    nojs::reveal_js_content(&document, &contract.no_js_selector, &contract.js_selector)?;

    let controller = Rc::new(PreferenceController::new(
        DomPage::new(document.clone(), contract.clone()),
        LocalPreferenceStore::from_window(),
        contract.clone(),
    ));

    let button = dom::query(&document, &contract.menu_button_selector)?;
    let ctl = Rc::clone(&controller);
    dom::listen(&button, "click", move |_event: Event| {
        report("toggle menu", ctl.toggle_accessibility_menu());
    })?;

    let font_panel = dom::by_id(&document, &contract.font_panel_id)?;
    let ctl = Rc::clone(&controller);
    dom::listen(&font_panel, "change", move |event: Event| {
        if let Some(input) = event_input(&event) {
            report("apply font", ctl.apply_font(&input.value()));
        }
    })?;

    let background_panel = dom::by_id(&document, &contract.background_panel_id)?;
    let ctl = Rc::clone(&controller);
    dom::listen(&background_panel, "change", move |event: Event| {
        let change = event_input(&event).and_then(|input| {
            let contract = ctl.contract();
            BackgroundChange::from_control_id(
                &input.id(),
                input.checked(),
                &contract.grid_control_id,
                &contract.blobs_control_id,
            )
        });
        report("apply background", ctl.apply_background(change).map(|_| ()));
    })?;

    hydrate_when_loaded(&window, &document.ready_state(), &controller)?;
    Ok(controller)
}

/// Hydrate now if `ready_state` is `"complete"`, otherwise on the window's
/// `load` event.
///
/// # Errors
/// Returns an error if the `load` listener cannot be attached.
pub fn hydrate_when_loaded(
    window: &Window,
    ready_state: &str,
    controller: &Rc<WebController>,
) -> Result<(), DomError> {
    if ready_state == "complete" {
        report("hydrate", controller.hydrate().map(|_| ()));
        return Ok(());
    }
    let ctl = Rc::clone(controller);
    dom::listen(window, "load", move |_event: Event| {
        report("hydrate", ctl.hydrate().map(|_| ()));
    })
}

fn event_input(event: &Event) -> Option<HtmlInputElement> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
}

fn report(action: &str, result: Result<(), ControllerError>) {
    if let Err(err) = result {
        log::error!("{action} failed: {err}");
    }
}
