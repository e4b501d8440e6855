//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Integer positions, so runs replay bit-for-bit
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod bird;
pub mod bounds;
pub mod collision;
pub mod pipe;
pub mod queue;
pub mod state;
pub mod tick;
pub mod world;

pub use bird::{Bird, FlightMode, KinematicState};
pub use bounds::Bounds;
pub use collision::{CollisionKind, detect_collision, passed_pipe};
pub use pipe::{PipePair, TemplateSet};
pub use queue::{ObstacleQueue, SlotId};
pub use state::{CueSink, GamePhase, GameState, SoundCue, launch_bounds, standby_bounds};
pub use tick::{TickInput, TickReport, tick, tick_with_sink};
pub use world::World;
