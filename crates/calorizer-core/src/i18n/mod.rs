//! English/Arabic display text.
//!
//! Messages are looked up by key in a table loaded from a JSON file of the form
//! `{"Key": {"valueEn": "...", "valueAr": "..."}}`. Lookups never fail: an
//! unknown key resolves to the key itself.

mod localizer;
mod table;

pub use localizer::Localizer;
pub use table::{LocalizationEntry, Translations};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Supported display languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    /// Language code as used in cookies and query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Parse an exact language code (`en` or `ar`, any case).
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.eq_ignore_ascii_case("en") {
            Some(Self::En)
        } else if code.eq_ignore_ascii_case("ar") {
            Some(Self::Ar)
        } else {
            None
        }
    }

    /// Resolve an optional code, falling back to English.
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Localization loading errors.
#[derive(Error, Debug)]
pub enum LocalizationError {
    #[error("no localization file configured")]
    NoSource,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed localization document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("localization document must be a JSON object")]
    NotAnObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!(Language::parse("ar"), Some(Language::Ar));
        assert_eq!(Language::parse(" AR "), Some(Language::Ar));
        assert_eq!(Language::parse("En"), Some(Language::En));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse("ar-EG"), None);
    }

    #[test]
    fn test_from_code_defaults_to_english() {
        assert_eq!(Language::from_code(None), Language::En);
        assert_eq!(Language::from_code(Some("de")), Language::En);
        assert_eq!(Language::from_code(Some("ar")), Language::Ar);
    }
}
