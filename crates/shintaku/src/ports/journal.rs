//! ReadingJournal Port
//!
//! Append/list/clear history store. The UI layer writes a
//! `SavedReading` after a result is available; the pipeline itself
//! never reads the journal back.

use async_trait::async_trait;

use crate::domain::entities::SavedReading;
use crate::domain::errors::OracleError;

#[async_trait]
pub trait ReadingJournal: Send + Sync {
    async fn save(&self, reading: SavedReading) -> Result<(), OracleError>;
    async fn list(&self) -> Result<Vec<SavedReading>, OracleError>;
    async fn clear(&self) -> Result<(), OracleError>;
}
