//! Platform abstraction layer
//!
//! Everything between the deterministic simulation and the host:
//! - Input events from any thread
//! - Fixed-rate tick loop with cooperative stop

pub mod input;
pub mod runner;

pub use input::{InputEvent, InputQueue, InputSender};
pub use runner::{Runner, StopHandle};
