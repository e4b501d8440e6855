//! Configuration errors
//!
//! Everything that can go wrong is caught when a [`SimConfig`] is validated
//! or a [`World`] is built. Ticking never fails.
//!
//! [`SimConfig`]: crate::config::SimConfig
//! [`World`]: crate::sim::World

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// World, obstacle or bird dimension is zero or negative
    NonPositiveSize { what: &'static str, value: i32 },
    /// A ratio has a zero denominator or lies outside (0, 1)
    InvalidRatio { what: &'static str, num: i32, den: i32 },
    ScrollSpeedNotPositive { speed: i32 },
    /// Fewer than two ticks per scroll cycle leaves no spawn interval
    ScrollTooFast { width: i32, speed: i32 },
    ParallaxNotPositive { factor: i32 },
    StandbyOscillation { speed: i32, accel: i32 },
    LaunchNotUpward { launch_velocity: i32 },
    GravityNotPositive { gravity: i32 },
    /// Gravity cancels the launch impulse in less than one tick
    LaunchWeakerThanGravity { launch_velocity: i32, gravity: i32 },
    AngleRange { rising: f32, falling: f32 },
    /// The world is too short to fit a single gap above the ground
    NoGapPlacement { first_top: i32, gap: i32, ground_top: i32 },
    TickIntervalZero,
    /// Value outside the range the integer pixel math supports
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSize { what, value } => {
                write!(f, "{what} must be positive, got {value}")
            }
            Self::InvalidRatio { what, num, den } => {
                write!(f, "{what} ratio {num}/{den} must lie strictly between 0 and 1")
            }
            Self::ScrollSpeedNotPositive { speed } => {
                write!(f, "scroll speed must be positive, got {speed}")
            }
            Self::ScrollTooFast { width, speed } => write!(
                f,
                "scroll speed {speed} is too fast for world width {width}: need at least two ticks per cycle"
            ),
            Self::ParallaxNotPositive { factor } => {
                write!(f, "parallax factor must be positive, got {factor}")
            }
            Self::StandbyOscillation { speed, accel } => write!(
                f,
                "standby oscillation needs positive speed and acceleration, got speed={speed}, accel={accel}"
            ),
            Self::LaunchNotUpward { launch_velocity } => {
                write!(f, "launch velocity must be negative (upward), got {launch_velocity}")
            }
            Self::GravityNotPositive { gravity } => {
                write!(f, "gravity must be positive, got {gravity}")
            }
            Self::LaunchWeakerThanGravity {
                launch_velocity,
                gravity,
            } => write!(
                f,
                "launch velocity {launch_velocity} is cancelled by gravity {gravity} in under one tick"
            ),
            Self::AngleRange { rising, falling } => write!(
                f,
                "rising angle {rising} must be below falling angle {falling}"
            ),
            Self::NoGapPlacement {
                first_top,
                gap,
                ground_top,
            } => write!(
                f,
                "no gap fits: first gap spans {first_top}..{} but ground starts at {ground_top}",
                first_top + gap
            ),
            Self::TickIntervalZero => write!(f, "tick interval must be non-zero"),
            Self::OutOfRange {
                what,
                value,
                min,
                max,
            } => write!(f, "{what} must lie in {min}..={max}, got {value}"),
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
