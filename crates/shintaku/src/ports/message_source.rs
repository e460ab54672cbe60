//! MessageSource Port
//!
//! Abstract interface for generated narrative messages. The production
//! implementation posts to the gateway endpoint; tests swap in mocks.

use async_trait::async_trait;

use crate::domain::entities::ReadingRequest;
use crate::domain::errors::OracleError;

/// Produces one generated message per card of a reading.
///
/// Implementations return messages in card order (past/present/future
/// for three-card spreads) and classify every failure through the
/// error taxonomy; the orchestrator decides on retries and fallback.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn generate(&self, request: &ReadingRequest) -> Result<Vec<String>, OracleError>;
}
