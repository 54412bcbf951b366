use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom::DomError;

/// Hide the no-script fallbacks and show the script-only blocks.
///
/// # Errors
/// Returns an error if a selector is invalid or a style cannot be set.
pub fn reveal_js_content(
    document: &Document,
    no_js_selector: &str,
    js_selector: &str,
) -> Result<(), DomError> {
    set_display(document, no_js_selector, "none")?;
    set_display(document, js_selector, "block")
}

fn set_display(document: &Document, selector: &str, display: &str) -> Result<(), DomError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|e| DomError::js(&e))?;
    for idx in 0..nodes.length() {
        if let Some(el) = nodes.item(idx).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            el.style()
                .set_property("display", display)
                .map_err(|e| DomError::js(&e))?;
        }
    }
    Ok(())
}
