//! ImageSource Port

use async_trait::async_trait;

use crate::domain::entities::Card;
use crate::domain::errors::OracleError;

/// Resolves a displayable image URL for a card. A failure here is a
/// degraded-but-usable state; it never blocks message display.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn load(&self, card: &Card) -> Result<String, OracleError>;
}
