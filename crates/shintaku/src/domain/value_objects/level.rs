//! ReadingLevel - requested depth of insight

use serde::{Deserialize, Serialize};

/// Depth of a reading; affects prompt length and framing only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadingLevel {
    #[default]
    Normal,
    /// Adds challenge/growth framing and a longer word budget
    Deep,
}

impl std::fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingLevel::Normal => write!(f, "normal"),
            ReadingLevel::Deep => write!(f, "deep"),
        }
    }
}

impl std::str::FromStr for ReadingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(ReadingLevel::Normal),
            "deep" => Ok(ReadingLevel::Deep),
            _ => Err(format!("Unknown reading level: {}", s)),
        }
    }
}
