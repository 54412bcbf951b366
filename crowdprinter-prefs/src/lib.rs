//! Crowdprinter accessibility preferences
//!
//! Platform-agnostic core for the page's accessibility menu: the preference
//! model, the pure mapping from preferences to presentation classes, and the
//! controller that keeps form controls, page classes and persisted values in
//! step. DOM and storage access go through the [`Page`] and
//! [`PreferenceStore`] traits.

pub mod contract;
pub mod controller;
pub mod font;
pub mod memory;
pub mod page;
pub mod prefs;
pub mod presentation;

pub use contract::{ClassPalette, ContractError, PageContract, StorageKeys};
pub use controller::{ControllerError, PreferenceController};
pub use font::Font;
pub use memory::{MemoryPage, MemoryStore};
pub use page::{Control, Page, Target};
pub use prefs::{
    BackgroundChange, BackgroundControl, PreferenceStore, Preferences, flag_str, parse_flag,
};
pub use presentation::{
    BackgroundPresentation, FontPresentation, Presentation, background_presentation,
    compute_presentation, font_presentation,
};
