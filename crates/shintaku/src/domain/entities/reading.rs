//! Reading - request and result types for one draw

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Card;
use crate::domain::errors::{ErrorKind, OracleError};
use crate::domain::value_objects::{DrawMode, Language, ReadingLevel};

/// One user-initiated draw. Constructed fresh per draw; immutable once
/// handed to the pipeline.
#[derive(Debug, Clone)]
pub struct ReadingRequest {
    pub cards: Vec<Card>,
    pub level: ReadingLevel,
    pub language: Language,
    pub mode: DrawMode,
}

impl ReadingRequest {
    pub fn new(cards: Vec<Card>, level: ReadingLevel, language: Language, mode: DrawMode) -> Self {
        Self {
            cards,
            level,
            language,
            mode,
        }
    }

    /// Enforce the mode/count invariant: single drawings carry exactly
    /// one card, three-card spreads exactly three. A mismatch is a
    /// programming error and fails fast.
    pub fn validate(&self) -> Result<(), OracleError> {
        let expected = self.mode.card_count();
        if self.cards.len() != expected {
            return Err(OracleError::new(
                ErrorKind::InvalidRequest,
                format!(
                    "{} mode requires exactly {} card(s), got {}",
                    self.mode,
                    expected,
                    self.cards.len()
                ),
            ));
        }
        Ok(())
    }
}

/// The settled outcome of one reading. Message slots are always filled
/// (static fallback text substituted on failure); images may be absent.
/// Failure state travels with the data instead of being reconstructed
/// by callers from scattered flags.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// One message per card slot, generated or fallback
    pub messages: Vec<String>,
    /// One image URL per card slot, `None` where loading failed
    pub images: Vec<Option<String>>,
    /// True when any sub-pipeline failed and degraded content was used
    pub partial_failure: bool,
    pub message_error: Option<OracleError>,
    pub image_error: Option<OracleError>,
}

/// A reading as persisted by the journal collaborator. Created by the
/// UI layer once a `GenerationResult` is available; the pipeline never
/// reads it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedReading {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub mode: DrawMode,
    pub cards: Vec<Card>,
    pub generated_messages: Vec<String>,
    pub generated_image_url: Option<String>,
    pub reading_level: ReadingLevel,
}

impl SavedReading {
    pub fn new(
        mode: DrawMode,
        cards: Vec<Card>,
        generated_messages: Vec<String>,
        generated_image_url: Option<String>,
        reading_level: ReadingLevel,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            mode,
            cards,
            generated_messages,
            generated_image_url,
            reading_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Element;

    fn card(name: &str) -> Card {
        Card {
            id: 1,
            name: name.to_string(),
            description: "Goddess of Love".to_string(),
            message: "Love yourself".to_string(),
            theme: "love".to_string(),
            element: Element::Water,
            keywords: vec!["love".to_string()],
            affirmation: "I am loved".to_string(),
            daily_guidance: vec!["Be kind to yourself".to_string()],
        }
    }

    #[test]
    fn single_mode_accepts_one_card() {
        let request = ReadingRequest::new(
            vec![card("Aphrodite")],
            ReadingLevel::Normal,
            Language::En,
            DrawMode::Single,
        );
        assert!(request.validate().is_ok());
    }

    #[test]
    fn single_mode_rejects_three_cards() {
        let request = ReadingRequest::new(
            vec![card("Aphrodite"), card("Athena"), card("Freya")],
            ReadingLevel::Normal,
            Language::En,
            DrawMode::Single,
        );
        let err = request.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRequest);
    }

    #[test]
    fn three_mode_rejects_one_card() {
        let request = ReadingRequest::new(
            vec![card("Aphrodite")],
            ReadingLevel::Deep,
            Language::Ja,
            DrawMode::Three,
        );
        let err = request.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRequest);
        assert!(!err.is_retryable());
    }
}
