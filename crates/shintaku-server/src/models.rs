//! API Models
//!
//! Wire types for the generate endpoint plus the input validation
//! gate. Every body field is defaulted so malformed JSON shapes fail
//! through validation with a stable message instead of a serde 422.

use serde::{Deserialize, Serialize};
use shintaku::{CardContent, DrawMode, Language, ReadingLevel};
use utoipa::ToSchema;

/// Substrings that mark card text as hostile. Checked case-insensitively.
const INJECTION_MARKERS: &[&str] = &["<script", "javascript:", "onerror=", "onclick="];

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_MESSAGE_LEN: usize = 1000;

fn default_language() -> String {
    "en".to_string()
}

fn default_level() -> String {
    "normal".to_string()
}

fn default_mode() -> String {
    "single".to_string()
}

/// One drawn card as sent over the wire.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CardPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub message: String,
}

/// Request body for `POST /api/generate-message`. Both modes send a
/// `cards` array; single readings carry exactly one entry.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMessageBody {
    #[serde(default)]
    pub cards: Vec<CardPayload>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_level")]
    pub reading_level: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Optional browser fingerprint for rate limiting.
    #[serde(default)]
    pub fingerprint: Option<String>,
}

/// A validated reading ready for prompt construction.
#[derive(Debug)]
pub struct ValidatedReading {
    pub cards: Vec<CardContent>,
    pub mode: DrawMode,
    pub level: ReadingLevel,
    pub language: Language,
}

impl GenerateMessageBody {
    /// Validate the body into a reading, or the exact client-facing
    /// rejection message.
    pub fn validate(&self) -> Result<ValidatedReading, &'static str> {
        let mode: DrawMode = self.mode.parse().map_err(|_| "Invalid mode")?;

        match mode {
            DrawMode::Single if self.cards.len() != 1 => {
                return Err("Single mode requires exactly 1 card")
            }
            DrawMode::Three if self.cards.len() != 3 => {
                return Err("Three card mode requires exactly 3 cards")
            }
            _ => {}
        }

        let cards: Vec<CardContent> = self
            .cards
            .iter()
            .map(|c| CardContent {
                name: c.name.clone(),
                description: c.description.clone(),
                message: c.message.clone(),
            })
            .collect();

        for card in &cards {
            if !card_fields_safe(card) {
                return Err("Invalid or malicious card data");
            }
        }

        let level: ReadingLevel = self
            .reading_level
            .parse()
            .map_err(|_| "Invalid reading level")?;
        let language: Language = self.language.parse().map_err(|_| "Invalid language")?;

        Ok(ValidatedReading {
            cards,
            mode,
            level,
            language,
        })
    }
}

fn card_fields_safe(card: &CardContent) -> bool {
    field_safe(&card.name, MAX_NAME_LEN)
        && field_safe(&card.description, MAX_DESCRIPTION_LEN)
        && field_safe(&card.message, MAX_MESSAGE_LEN)
}

/// A card field must be present, within its ceiling, and free of
/// injection markers.
fn field_safe(value: &str, max_len: usize) -> bool {
    if value.trim().is_empty() || value.len() > max_len {
        return false;
    }
    let lowered = value.to_lowercase();
    !INJECTION_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Success body: one generated message per card, in draw order
/// (past/present/future for spreads).
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateMessageResponse {
    pub messages: Vec<String>,
}

impl GenerateMessageResponse {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

/// Error body shared by every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    /// Seconds until a rate-limited client may retry.
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            retry_after: None,
        }
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self {
            error: "Too many requests. Please try again later.".to_string(),
            retry_after: Some(retry_after_secs),
        }
    }
}
