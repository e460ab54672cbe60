//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the reading pipeline interacts
//! with its collaborators: the message-generation gateway, the image
//! library, the static card deck, and the reading journal.
//!
//! Implementations of these traits live in the infrastructure crates.

mod catalog;
mod image_source;
mod journal;
mod message_source;

pub use catalog::*;
pub use image_source::*;
pub use journal::*;
pub use message_source::*;
