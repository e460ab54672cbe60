//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Card: one immutable entry of the 48-card goddess deck
//! - ReadingRequest: a user draw, frozen once issued
//! - GenerationResult: the settled outcome of one reading
//! - SavedReading: history record handed to the journal collaborator

mod card;
mod reading;

pub use card::*;
pub use reading::*;
