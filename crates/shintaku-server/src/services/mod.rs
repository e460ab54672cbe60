//! Upstream Services

pub mod gemini;

pub use gemini::{GeminiClient, TextGenerator};
