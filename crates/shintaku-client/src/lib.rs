//! Shintaku Client Adapters
//!
//! Concrete implementations of the domain ports used by a UI process:
//! `GatewayClient` posts readings to the shintaku-server endpoint
//! (`MessageSource`), and `AssetLibrary` resolves goddess card images
//! from the local asset tree (`ImageSource`). Both are driven by the
//! orchestrator through the shared retry executor.

pub mod api;
pub mod assets;

pub use api::GatewayClient;
pub use assets::AssetLibrary;
