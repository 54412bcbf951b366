//! Font families offered by the accessibility menu
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed set of font identifiers the page stylesheet knows about.
///
/// The string form doubles as the stored preference value and as the suffix of
/// the presentation class (`font-<id>`) and radio control id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Font {
    SylexiadSans,
    AtkinsonHyperlegible,
    OpenDyslexicThree,
    #[default]
    Ubuntu,
    #[serde(rename = "serif")]
    Serif,
    #[serde(rename = "sans")]
    Sans,
}

impl Font {
    /// Every known font, in menu order.
    pub const ALL: [Self; 6] = [
        Self::SylexiadSans,
        Self::AtkinsonHyperlegible,
        Self::OpenDyslexicThree,
        Self::Ubuntu,
        Self::Serif,
        Self::Sans,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SylexiadSans => "SylexiadSans",
            Self::AtkinsonHyperlegible => "AtkinsonHyperlegible",
            Self::OpenDyslexicThree => "OpenDyslexicThree",
            Self::Ubuntu => "Ubuntu",
            Self::Serif => "serif",
            Self::Sans => "sans",
        }
    }

    /// Resolve a stored value, falling back to the default font when the value
    /// is absent or not one of the known identifiers.
    #[must_use]
    pub fn resolve(stored: Option<&str>) -> Self {
        match stored {
            None => Self::default(),
            Some(raw) => raw.parse().unwrap_or_else(|()| {
                log::warn!("Ignoring unknown stored font {raw:?}");
                Self::default()
            }),
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Font {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|font| font.as_str() == s)
            .ok_or(())
    }
}

impl From<Font> for String {
    fn from(value: Font) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_parse_back_to_the_same_font() {
        for font in Font::ALL {
            assert_eq!(font.as_str().parse::<Font>(), Ok(font));
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("ubuntu".parse::<Font>().is_err());
        assert!("Serif".parse::<Font>().is_err());
        assert_eq!("serif".parse::<Font>(), Ok(Font::Serif));
    }

    #[test]
    fn resolve_defaults_to_ubuntu() {
        assert_eq!(Font::resolve(None), Font::Ubuntu);
        assert_eq!(Font::resolve(Some("Comic Sans")), Font::Ubuntu);
        assert_eq!(Font::resolve(Some("OpenDyslexicThree")), Font::OpenDyslexicThree);
    }

    #[test]
    fn serde_uses_stored_identifiers() {
        let json = serde_json::to_string(&Font::Sans).unwrap();
        assert_eq!(json, "\"sans\"");
        let parsed: Font = serde_json::from_str("\"AtkinsonHyperlegible\"").unwrap();
        assert_eq!(parsed, Font::AtkinsonHyperlegible);
    }
}
