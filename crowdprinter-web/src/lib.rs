#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod console;
pub mod dom;
pub mod nojs;
pub mod page;
pub mod storage;
pub mod widget;

pub use page::DomPage;
pub use storage::LocalPreferenceStore;
pub use widget::{InstallError, WebController, hydrate_when_loaded, install, page_contract};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console::init(log::LevelFilter::Info);

    let installed = dom::document()
        .map_err(InstallError::from)
        .and_then(|doc| page_contract(&doc))
        .and_then(install);
    if let Err(err) = installed {
        log::error!("accessibility menu unavailable: {err}");
    }
}
