//! Shintaku API Routes
//!
//! - /api/generate-message - oracle message generation
//! - /health - liveness probe
//! - /swagger-ui - interactive API documentation

pub mod generate;
pub mod swagger;
