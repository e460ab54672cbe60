//! Gemini Client
//!
//! Thin wrapper over the generateContent REST endpoint. Three-card
//! readings send a response schema so the model returns strict JSON;
//! single readings take the text as-is. All failures map into the
//! shared error taxonomy and upstream details never leave the process.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shintaku::{DrawMode, ErrorKind, OracleError};

const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Abstract text backend so route handlers can be tested without the
/// real API.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, mode: DrawMode) -> Result<String, OracleError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Production Gemini backend.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key,
            model,
        }
    }

    fn request_body(prompt: &str, mode: DrawMode) -> GenerateContentRequest {
        let generation_config = match mode {
            DrawMode::Single => None,
            DrawMode::Three => Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: json!({
                    "type": "OBJECT",
                    "properties": {
                        "past": { "type": "STRING" },
                        "present": { "type": "STRING" },
                        "future": { "type": "STRING" }
                    },
                    "required": ["past", "present", "future"]
                }),
            }),
        };
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, mode: DrawMode) -> Result<String, OracleError> {
        let url = format!(
            "{GEMINI_BASE}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&Self::request_body(prompt, mode))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body, "Gemini request failed");
            return Err(OracleError::from_status(
                status.as_u16(),
                format!("upstream returned {status}"),
            ));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(OracleError::new(
                ErrorKind::ParseError,
                "Gemini returned no text",
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mode_sends_no_generation_config() {
        let body = GeminiClient::request_body("hello", DrawMode::Single);
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("generationConfig").is_none());
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn three_mode_requires_all_positions_in_the_schema() {
        let body = GeminiClient::request_body("hello", DrawMode::Three);
        let json = serde_json::to_value(&body).unwrap();
        let config = &json["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        let required = config["responseSchema"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        for position in ["past", "present", "future"] {
            assert!(required.iter().any(|v| v == position));
        }
    }

    #[test]
    fn empty_candidates_decode_without_error() {
        let payload: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.candidates.is_empty());
    }
}
