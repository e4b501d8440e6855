//! Flappy Sim - deterministic core of a side-scrolling flap-through-the-gaps game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird, pipes, world scroll, collisions, rounds)
//! - `render`: Sprite instance lists for a host renderer
//! - `platform`: Cross-thread input and the fixed-rate tick loop
//! - `config`: Data-driven geometry and tuning

pub mod config;
pub mod error;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::SimConfig;
pub use error::ConfigError;
pub use platform::{InputQueue, InputSender, Runner, StopHandle};
pub use render::Scene;
pub use sim::{GamePhase, GameState, SoundCue, TickInput, TickReport, tick};
