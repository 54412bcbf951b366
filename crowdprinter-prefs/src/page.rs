//! Abstraction over the host page the controller drives
use crate::font::Font;
use crate::prefs::BackgroundControl;

/// Element groups the controller touches. A target may resolve to several
/// elements (every blob, every content node); class edits apply to all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Elements carrying the content marker class.
    Content,
    /// The document body.
    Body,
    /// Elements carrying the blob marker class.
    Blobs,
    FontPanel,
    BackgroundPanel,
}

/// Form controls whose checked state mirrors a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    FontRadio(Font),
    Background(BackgroundControl),
}

/// Trait for abstracting DOM access.
/// Platform-specific implementations should provide this.
pub trait Page {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Whether the first element of `target` currently carries `class`.
    ///
    /// # Errors
    ///
    /// Returns an error if the target element is missing.
    fn has_class(&self, target: Target, class: &str) -> Result<bool, Self::Error>;

    /// Add (`on == true`) or remove `class` on every element of `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the class list cannot be updated.
    fn set_class(&self, target: Target, class: &str, on: bool) -> Result<(), Self::Error>;

    /// Remove each of `classes` from every element of `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the class list cannot be updated.
    fn remove_classes(&self, target: Target, classes: &[String]) -> Result<(), Self::Error> {
        for class in classes {
            self.set_class(target, class, false)?;
        }
        Ok(())
    }

    /// Checked state of a control.
    ///
    /// # Errors
    ///
    /// Returns an error if the control is missing.
    fn checked(&self, control: Control) -> Result<bool, Self::Error>;

    /// Set the checked state of a control.
    ///
    /// # Errors
    ///
    /// Returns an error if the control is missing.
    fn set_checked(&self, control: Control, checked: bool) -> Result<(), Self::Error>;
}
