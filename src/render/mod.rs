//! Render description
//!
//! Converts simulation state into flat sprite instance lists. No GPU code
//! here; a host renderer uploads `Scene::as_bytes` as an instance buffer.

pub mod instance;
pub mod scene;

pub use instance::{SpriteInstance, SpriteKind, colors};
pub use scene::Scene;
