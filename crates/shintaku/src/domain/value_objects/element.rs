//! Element - elemental affinity of a goddess card

use serde::{Deserialize, Serialize};

/// Elemental affinity carried by every card in the deck
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Spirit,
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Fire => write!(f, "fire"),
            Element::Water => write!(f, "water"),
            Element::Earth => write!(f, "earth"),
            Element::Air => write!(f, "air"),
            Element::Spirit => write!(f, "spirit"),
        }
    }
}
