//! CardCatalog Port
//!
//! The static 48-card deck, loaded once per language at startup and
//! never mutated. Only lookups are exposed.

use crate::domain::entities::Card;

pub trait CardCatalog: Send + Sync {
    fn by_id(&self, id: u32) -> Option<&Card>;
    fn by_name(&self, name: &str) -> Option<&Card>;
    fn all(&self) -> &[Card];
}
