//! Supported content languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A language a tab can display.
///
/// The variant order is the canonical display order used everywhere a list of
/// languages is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French.
    Fr,
    /// English.
    En,
    /// Spanish.
    Es,
    /// German.
    De,
    /// Italian.
    It,
}

impl Language {
    /// All languages in canonical order.
    pub const ALL: [Language; 5] = [
        Language::Fr,
        Language::En,
        Language::Es,
        Language::De,
        Language::It,
    ];

    /// Two-letter code (e.g., `"fr"`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Es => "es",
            Language::De => "de",
            Language::It => "it",
        }
    }

    /// Native display name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Fr => "Français",
            Language::En => "English",
            Language::Es => "Español",
            Language::De => "Deutsch",
            Language::It => "Italiano",
        }
    }

    /// Flag glyph shown next to the name.
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Language::Fr => "🇫🇷",
            Language::En => "🇬🇧",
            Language::Es => "🇪🇸",
            Language::De => "🇩🇪",
            Language::It => "🇮🇹",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0:?}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownLanguage(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "FR".parse::<Language>(),
            Err(UnknownLanguage("FR".to_owned()))
        );
        assert!("pt".parse::<Language>().is_err());
    }

    #[test]
    fn test_canonical_order() {
        let codes: Vec<_> = Language::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["fr", "en", "es", "de", "it"]);
    }

    #[test]
    fn test_serde_uses_code() {
        assert_eq!(serde_json::to_string(&Language::De).unwrap(), "\"de\"");
        assert_eq!(
            serde_json::from_str::<Language>("\"it\"").unwrap(),
            Language::It
        );
    }

    #[test]
    fn test_display_metadata() {
        assert_eq!(Language::Fr.display_name(), "Français");
        assert_eq!(Language::Es.flag(), "🇪🇸");
        assert_eq!(Language::En.to_string(), "en");
    }
}
