use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, Storage, Window};

/// Failures when talking to the browser DOM.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("`window` is unavailable")]
    NoWindow,
    #[error("`document` is unavailable")]
    NoDocument,
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("element `{0}` is not an input")]
    NotInput(String),
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl DomError {
    pub(crate) fn js(value: &JsValue) -> Self {
        Self::Js(js_error_message(value))
    }
}

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns an error when executed outside of a browser context.
pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

/// Retrieve the document object for DOM interactions.
///
/// # Errors
/// Returns an error when the document cannot be accessed from the current window.
pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Access the browser `localStorage` handle, if the browser grants one.
///
/// Private browsing modes and sandboxed frames may refuse access; that is
/// reported as `None` rather than an error.
#[must_use]
pub fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|win| win.local_storage().ok().flatten())
}

/// First element matching `selector`.
///
/// # Errors
/// Returns an error if the selector is invalid or nothing matches.
pub fn query(document: &Document, selector: &str) -> Result<Element, DomError> {
    document
        .query_selector(selector)
        .map_err(|e| DomError::js(&e))?
        .ok_or_else(|| DomError::MissingElement(selector.to_string()))
}

/// Element with the given id.
///
/// # Errors
/// Returns an error if no element carries `id`.
pub fn by_id(document: &Document, id: &str) -> Result<Element, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(format!("#{id}")))
}

/// Every element carrying `class`, in document order.
#[must_use]
pub fn by_class(document: &Document, class: &str) -> Vec<Element> {
    let collection = document.get_elements_by_class_name(class);
    (0..collection.length())
        .filter_map(|idx| collection.item(idx))
        .collect()
}

/// Attach `handler` to `event` on `target` for the lifetime of the page.
///
/// # Errors
/// Returns an error if the browser rejects the listener.
pub fn listen<T, F>(target: &T, event: &str, handler: F) -> Result<(), DomError>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .as_ref()
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| DomError::js(&e))?;
    closure.forget();
    Ok(())
}
