//! Language - supported reading locales

use serde::{Deserialize, Serialize};

/// Locale of a reading. Narrative prompt templates exist for Japanese
/// and English; Spanish and French readings reuse the English
/// narrative while user-facing error text stays fully localized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ja,
    #[default]
    En,
    Es,
    Fr,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Ja => write!(f, "ja"),
            Language::En => write!(f, "en"),
            Language::Es => write!(f, "es"),
            Language::Fr => write!(f, "fr"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ja" => Ok(Language::Ja),
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "fr" => Ok(Language::Fr),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}
