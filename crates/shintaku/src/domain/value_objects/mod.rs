//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod element;
mod language;
mod level;
mod mode;

pub use element::*;
pub use language::*;
pub use level::*;
pub use mode::*;
