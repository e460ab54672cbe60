//! Shintaku Domain Library
//!
//! Core types and pipeline logic for the Shintaku oracle-reading
//! service: a user draws one or three goddess cards, and the system
//! turns that selection into a generated narrative message (plus a
//! card image), falling back to the deck's static text when
//! generation fails.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain/`): Pure business types
//!   - `entities/`: Core models (Card, ReadingRequest, GenerationResult, SavedReading)
//!   - `value_objects/`: Immutable value types (DrawMode, ReadingLevel, Language, Element)
//!   - `errors/`: The closed error taxonomy and classifier
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `MessageSource` / `ImageSource`: content generation backends
//!   - `CardCatalog` / `ReadingJournal`: static deck and history collaborators
//!
//! - **Pipeline**:
//!   - `prompt`: deterministic prompt construction
//!   - `interpret`: upstream response parsing and validation
//!   - `retry`: exponential-backoff executor for transient failures
//!   - `orchestrator`: per-reading coordination of messages and images

pub mod domain;
pub mod interpret;
pub mod orchestrator;
pub mod ports;
pub mod prompt;
pub mod retry;

// Re-export commonly used types
pub use domain::{
    Card, CardContent, DrawMode, Element, ErrorKind, GenerationResult, Language, OracleError,
    ReadingLevel, ReadingRequest, SavedReading,
};
pub use interpret::interpret;
pub use orchestrator::{ReadingOutcome, ReadingSession};
pub use ports::{CardCatalog, ImageSource, MessageSource, ReadingJournal};
pub use prompt::build_prompt;
pub use retry::{retry_with_backoff, RetryPolicy};
