//! Card - one entry of the goddess deck
//!
//! The deck itself is static content loaded once per language at
//! startup; cards are never mutated and are looked up by id or name.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Element;

/// A goddess card. `message` is the pre-authored fallback text shown
/// when message generation fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Deck position, 1..=48, unique
    pub id: u32,
    pub name: String,
    pub description: String,
    pub message: String,
    pub theme: String,
    pub element: Element,
    pub keywords: Vec<String>,
    pub affirmation: String,
    pub daily_guidance: Vec<String>,
}

/// The subset of card fields that travels over the wire and is
/// embedded into prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardContent {
    pub name: String,
    pub description: String,
    pub message: String,
}

impl From<&Card> for CardContent {
    fn from(card: &Card) -> Self {
        Self {
            name: card.name.clone(),
            description: card.description.clone(),
            message: card.message.clone(),
        }
    }
}
