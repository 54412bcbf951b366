//! Pure mapping from preferences to presentation classes
use std::collections::BTreeSet;

use crate::contract::ClassPalette;
use crate::page::Target;
use crate::prefs::Preferences;

/// Class edit for the content element(s): drop every known font class, then
/// add the selected one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPresentation {
    pub remove: Vec<String>,
    pub add: String,
}

/// Background decoration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundPresentation {
    pub body_grid: bool,
    pub blobs_hidden: bool,
}

/// Everything the page should show for a given set of preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub font: FontPresentation,
    pub background: BackgroundPresentation,
}

#[must_use]
pub fn font_presentation(font_id: &str, palette: &ClassPalette) -> FontPresentation {
    FontPresentation {
        remove: palette.known_font_classes(),
        add: palette.font_class(font_id),
    }
}

impl FontPresentation {
    /// Also drop the class of `previous`, which may be a font outside the
    /// palette that an earlier edit added.
    #[must_use]
    pub fn replacing(mut self, previous: Option<&str>, palette: &ClassPalette) -> Self {
        if let Some(previous) = previous {
            let class = palette.font_class(previous);
            if !self.remove.contains(&class) {
                self.remove.push(class);
            }
        }
        self
    }
}

#[must_use]
pub const fn background_presentation(show_grid: bool, show_blobs: bool) -> BackgroundPresentation {
    BackgroundPresentation {
        body_grid: show_grid,
        blobs_hidden: !show_blobs,
    }
}

#[must_use]
pub fn compute_presentation(prefs: &Preferences, palette: &ClassPalette) -> Presentation {
    Presentation {
        font: font_presentation(prefs.font.as_str(), palette),
        background: background_presentation(prefs.background_grid, prefs.background_blobs),
    }
}

impl Presentation {
    /// Preference-driven classes that must be present on `target`. Panels are
    /// not preference-driven and always yield an empty set.
    #[must_use]
    pub fn classes_for(&self, target: Target, palette: &ClassPalette) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        match target {
            Target::Content => {
                set.insert(self.font.add.clone());
            }
            Target::Body => {
                if self.background.body_grid {
                    set.insert(palette.body_grid.clone());
                }
            }
            Target::Blobs => {
                if self.background.blobs_hidden {
                    set.insert(palette.blob_hidden.clone());
                }
            }
            Target::FontPanel | Target::BackgroundPanel => {}
        }
        set
    }
}
