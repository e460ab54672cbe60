//! Response interpretation
//!
//! Turns raw generated text into the per-card message list the rest of
//! the pipeline consumes. Single readings pass the text through
//! verbatim; three-card readings expect a JSON object with `past`,
//! `present` and `future` string fields and flatten it into positional
//! order. Anything malformed becomes a `ParseError` so the caller can
//! fall back to the cards' stock messages.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{ErrorKind, OracleError};
use crate::domain::value_objects::DrawMode;

/// Wire shape of a three-card generation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreeCardMessages {
    pub past: String,
    pub present: String,
    pub future: String,
}

/// Interpret upstream text for the given mode.
///
/// Returns exactly `mode.card_count()` messages on success, in
/// past/present/future order for three-card spreads.
pub fn interpret(raw: &str, mode: DrawMode) -> Result<Vec<String>, OracleError> {
    match mode {
        DrawMode::Single => interpret_single(raw),
        DrawMode::Three => interpret_three(raw),
    }
}

fn interpret_single(raw: &str) -> Result<Vec<String>, OracleError> {
    if raw.trim().is_empty() {
        return Err(OracleError::new(
            ErrorKind::ParseError,
            "generated text was empty",
        ));
    }
    Ok(vec![raw.to_string()])
}

fn interpret_three(raw: &str) -> Result<Vec<String>, OracleError> {
    let parsed: ThreeCardMessages = serde_json::from_str(raw).map_err(|e| {
        OracleError::new(
            ErrorKind::ParseError,
            format!("three-card payload was not valid JSON: {e}"),
        )
    })?;

    let messages = vec![parsed.past, parsed.present, parsed.future];
    if messages.iter().any(|m| m.trim().is_empty()) {
        return Err(OracleError::new(
            ErrorKind::ParseError,
            "three-card payload had an empty position",
        ));
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_text_passes_through_verbatim() {
        let raw = "The goddess sees you.\n\nTrust the quiet voice within.";
        let messages = interpret(raw, DrawMode::Single).unwrap();
        assert_eq!(messages, vec![raw.to_string()]);
    }

    #[test]
    fn blank_single_text_is_a_parse_error() {
        let err = interpret("   \n  ", DrawMode::Single).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
    }

    #[test]
    fn three_card_json_flattens_in_position_order() {
        let raw = r#"{
            "future": "A door opens.",
            "past": "You carried much.",
            "present": "You are ready."
        }"#;
        let messages = interpret(raw, DrawMode::Three).unwrap();
        assert_eq!(
            messages,
            vec![
                "You carried much.".to_string(),
                "You are ready.".to_string(),
                "A door opens.".to_string(),
            ]
        );
    }

    #[test]
    fn missing_future_field_is_a_parse_error() {
        let raw = r#"{"past": "a", "present": "b"}"#;
        let err = interpret(raw, DrawMode::Three).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
    }

    #[test]
    fn empty_position_is_a_parse_error() {
        let raw = r#"{"past": "a", "present": "", "future": "c"}"#;
        let err = interpret(raw, DrawMode::Three).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
    }

    #[test]
    fn non_json_three_card_text_is_a_parse_error() {
        let err = interpret("Past: you carried much.", DrawMode::Three).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ParseError);
    }
}
