//! DrawMode - single card or three-card spread

use serde::{Deserialize, Serialize};

/// How many cards a reading draws
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    Single,
    /// Past / present / future spread
    Three,
}

impl DrawMode {
    /// Number of cards the mode requires
    pub fn card_count(self) -> usize {
        match self {
            DrawMode::Single => 1,
            DrawMode::Three => 3,
        }
    }
}

impl std::fmt::Display for DrawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawMode::Single => write!(f, "single"),
            DrawMode::Three => write!(f, "three"),
        }
    }
}

impl std::str::FromStr for DrawMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(DrawMode::Single),
            "three" => Ok(DrawMode::Three),
            _ => Err(format!("Unknown draw mode: {}", s)),
        }
    }
}
