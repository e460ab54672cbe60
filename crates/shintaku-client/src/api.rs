//! Gateway API Client
//!
//! `MessageSource` backed by the shintaku-server generate endpoint.
//! The wire body mirrors the gateway contract (a `cards` array for
//! both modes, camelCase `readingLevel`) and every failure is
//! classified into the domain error taxonomy so the orchestrator can
//! decide on retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shintaku::{
    DrawMode, ErrorKind, Language, MessageSource, OracleError, ReadingLevel, ReadingRequest,
};

/// Client for `POST /api/generate-message`.
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
    /// Browser fingerprint forwarded for rate limiting, when known.
    fingerprint: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateMessageRequest<'a> {
    cards: Vec<WireCard<'a>>,
    language: Language,
    reading_level: ReadingLevel,
    mode: DrawMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct WireCard<'a> {
    name: &'a str,
    description: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateMessageEnvelope {
    #[serde(default)]
    messages: Vec<String>,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            fingerprint: None,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    fn wire_body<'a>(&'a self, request: &'a ReadingRequest) -> GenerateMessageRequest<'a> {
        GenerateMessageRequest {
            cards: request
                .cards
                .iter()
                .map(|c| WireCard {
                    name: &c.name,
                    description: &c.description,
                    message: &c.message,
                })
                .collect(),
            language: request.language,
            reading_level: request.level,
            mode: request.mode,
            fingerprint: self.fingerprint.as_deref(),
        }
    }
}

/// Check the envelope covers every card slot with usable text.
fn unpack_envelope(
    envelope: GenerateMessageEnvelope,
    mode: DrawMode,
) -> Result<Vec<String>, OracleError> {
    let messages = envelope.messages;
    if messages.len() != mode.card_count() || messages.iter().any(|m| m.trim().is_empty()) {
        return Err(OracleError::new(
            ErrorKind::ParseError,
            "gateway response did not cover every card slot",
        ));
    }
    Ok(messages)
}

#[async_trait]
impl MessageSource for GatewayClient {
    async fn generate(&self, request: &ReadingRequest) -> Result<Vec<String>, OracleError> {
        request.validate()?;

        let url = format!("{}/api/generate-message", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&self.wire_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "gateway rejected generation request");
            return Err(OracleError::from_status(
                status.as_u16(),
                format!("gateway returned {status}"),
            ));
        }

        let envelope: GenerateMessageEnvelope = response.json().await?;
        unpack_envelope(envelope, request.mode)
    }
}
