//! `Page` implementation over the live document
use crowdprinter_prefs::{BackgroundControl, Control, Page, PageContract, Target};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::dom::{self, DomError};

/// The host document, addressed through a [`PageContract`].
///
/// Lookups happen on every call, so markup swapped in after start-up is
/// picked up.
#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
    contract: PageContract,
}

impl DomPage {
    #[must_use]
    pub const fn new(document: Document, contract: PageContract) -> Self {
        Self { document, contract }
    }

    /// Elements addressed by `target`. Only the first content node is
    /// restyled; blobs may legitimately be absent.
    fn elements(&self, target: Target) -> Result<Vec<Element>, DomError> {
        let classes = &self.contract.classes;
        match target {
            Target::Content => dom::by_class(&self.document, &classes.content_marker)
                .into_iter()
                .next()
                .map(|el| vec![el])
                .ok_or_else(|| DomError::MissingElement(format!(".{}", classes.content_marker))),
            Target::Body => self
                .document
                .body()
                .map(|body| vec![Element::from(body)])
                .ok_or_else(|| DomError::MissingElement("body".to_string())),
            Target::Blobs => Ok(dom::by_class(&self.document, &classes.blob_marker)),
            Target::FontPanel => {
                dom::by_id(&self.document, &self.contract.font_panel_id).map(|el| vec![el])
            }
            Target::BackgroundPanel => {
                dom::by_id(&self.document, &self.contract.background_panel_id).map(|el| vec![el])
            }
        }
    }

    fn control_id(&self, control: Control) -> String {
        match control {
            Control::FontRadio(font) => self.contract.font_radio_id(font.as_str()),
            Control::Background(BackgroundControl::Grid) => self.contract.grid_control_id.clone(),
            Control::Background(BackgroundControl::Blobs) => {
                self.contract.blobs_control_id.clone()
            }
        }
    }

    fn input(&self, control: Control) -> Result<HtmlInputElement, DomError> {
        let id = self.control_id(control);
        dom::by_id(&self.document, &id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| DomError::NotInput(id))
    }
}

impl Page for DomPage {
    type Error = DomError;

    fn has_class(&self, target: Target, class: &str) -> Result<bool, Self::Error> {
        self.elements(target)?
            .first()
            .map(|el| el.class_list().contains(class))
            .ok_or_else(|| DomError::MissingElement(format!("{target:?}")))
    }

    fn set_class(&self, target: Target, class: &str, on: bool) -> Result<(), Self::Error> {
        for el in self.elements(target)? {
            let list = el.class_list();
            let result = if on {
                list.add_1(class)
            } else {
                list.remove_1(class)
            };
            result.map_err(|e| DomError::js(&e))?;
        }
        Ok(())
    }

    fn remove_classes(&self, target: Target, classes: &[String]) -> Result<(), Self::Error> {
        let names = classes
            .iter()
            .map(|class| wasm_bindgen::JsValue::from_str(class))
            .collect::<js_sys::Array>();
        for el in self.elements(target)? {
            el.class_list()
                .remove(&names)
                .map_err(|e| DomError::js(&e))?;
        }
        Ok(())
    }

    fn checked(&self, control: Control) -> Result<bool, Self::Error> {
        Ok(self.input(control)?.checked())
    }

    fn set_checked(&self, control: Control, checked: bool) -> Result<(), Self::Error> {
        self.input(control)?.set_checked(checked);
        Ok(())
    }
}
