//! Simulation configuration
//!
//! One immutable value carries every tuning constant. Sessions, worlds and
//! birds copy what they need from it at construction time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound for any configured length or per-tick speed, in pixels.
/// Keeps every product in the pixel math well inside `i32`.
pub const MAX_PIXELS: i32 = 1 << 16;

/// Longest accepted tick, in milliseconds
pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

/// Integer fraction applied to a pixel length (`value * num / den`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub num: i32,
    pub den: i32,
}

impl Ratio {
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Scale a length, truncating like integer pixel math does
    #[inline]
    pub fn of(&self, value: i32) -> i32 {
        // A valid ratio is below one, so the result fits back in i32
        (i64::from(value) * i64::from(self.num) / i64::from(self.den)) as i32
    }

    fn check(&self, what: &'static str) -> Result<(), ConfigError> {
        if self.den <= 0 || self.num <= 0 || self.num >= self.den {
            return Err(ConfigError::InvalidRatio {
                what,
                num: self.num,
                den: self.den,
            });
        }
        Ok(())
    }
}

/// Play-field and sprite sizes in pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    pub obstacle_width: i32,
    /// Bird footprint; 0 derives it from the world size
    pub bird_width: i32,
    pub bird_height: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 720,
            height: 1280,
            obstacle_width: 130,
            bird_width: 0,
            bird_height: 0,
        }
    }
}

impl WorldConfig {
    /// Bird size, falling back to a sixth of the width by 3/32 of the height
    pub fn bird_size(&self) -> (i32, i32) {
        let w = if self.bird_width > 0 {
            self.bird_width
        } else {
            self.width / 6
        };
        let h = if self.bird_height > 0 {
            self.bird_height
        } else {
            self.height * 3 / 32
        };
        (w, h)
    }
}

/// Ground line, gap placement and scrolling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Ground line as a fraction of height, measured from the top
    pub ground_line: Ratio,
    /// Opening between the two halves of a pipe pair
    pub gap: Ratio,
    /// Distance from the top of the world to the highest gap
    pub margin: Ratio,
    /// Vertical spacing between consecutive gap placements
    pub step: Ratio,
    /// Slack granted before an overlap counts as a crash
    pub collision_padding: i32,
    /// Foreground scroll in pixels per tick
    pub scroll_speed: i32,
    /// Foreground moves this many times faster than the sky
    pub parallax_factor: i32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            ground_line: Ratio::new(4, 5),
            gap: Ratio::new(3, 10),
            margin: Ratio::new(1, 10),
            step: Ratio::new(1, 10),
            collision_padding: 20,
            scroll_speed: 30,
            parallax_factor: 8,
        }
    }
}

/// Bird kinematics, all in pixels per tick and degrees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdTuning {
    /// Peak speed of the standby bob
    pub standby_speed: i32,
    pub standby_accel: i32,
    /// Vertical velocity right after a flap (negative is up)
    pub launch_velocity: i32,
    pub gravity: i32,
    /// Nose-up limit
    pub rising_max_angle: f32,
    /// Nose-down limit
    pub falling_max_angle: f32,
}

impl Default for BirdTuning {
    fn default() -> Self {
        Self {
            standby_speed: 10,
            standby_accel: 1,
            launch_velocity: -80,
            gravity: 20,
            rising_max_angle: -30.0,
            falling_max_angle: 70.0,
        }
    }
}

impl BirdTuning {
    /// Ticks from launch until gravity cancels the impulse
    pub fn frames_to_apex(&self) -> i32 {
        (self.launch_velocity / -self.gravity).max(1)
    }

    /// Ticks budgeted for the nose-down swing after the apex
    pub fn descent_frames(&self) -> i32 {
        (2 * self.launch_velocity / -self.gravity).max(1)
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub geometry: GeometryConfig,
    pub bird: BirdTuning,
    /// Wall-clock length of one tick when running in real time
    pub tick_interval_ms: u64,
    /// Seed for pipe placement
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            geometry: GeometryConfig::default(),
            bird: BirdTuning::default(),
            tick_interval_ms: 50,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Ticks for the foreground to scroll one full world width
    pub fn recycle_frames(&self) -> i32 {
        self.world.width / self.geometry.scroll_speed
    }

    /// Ground line in world coordinates for a world whose top is at zero
    pub fn ground_top(&self) -> i32 {
        self.geometry.ground_line.of(self.world.height)
    }

    /// Reject anything that would divide by zero or produce a degenerate
    /// world. Gap placement itself is checked when templates are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        let geo = &self.geometry;
        let bird = &self.bird;

        for (what, value) in [
            ("world width", world.width),
            ("world height", world.height),
            ("obstacle width", world.obstacle_width),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveSize { what, value });
            }
            check_range(what, value.into(), 1, MAX_PIXELS.into())?;
        }
        check_range("bird width", world.bird_width.into(), 0, MAX_PIXELS.into())?;
        check_range("bird height", world.bird_height.into(), 0, MAX_PIXELS.into())?;
        let (bird_w, bird_h) = world.bird_size();
        for (what, value) in [("bird width", bird_w), ("bird height", bird_h)] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveSize { what, value });
            }
        }

        geo.ground_line.check("ground line")?;
        geo.gap.check("gap")?;
        geo.margin.check("margin")?;
        geo.step.check("step")?;
        if geo.step.of(world.height) <= 0 {
            return Err(ConfigError::NonPositiveSize {
                what: "gap step",
                value: geo.step.of(world.height),
            });
        }

        if geo.scroll_speed <= 0 {
            return Err(ConfigError::ScrollSpeedNotPositive {
                speed: geo.scroll_speed,
            });
        }
        if world.width / geo.scroll_speed < 2 {
            return Err(ConfigError::ScrollTooFast {
                width: world.width,
                speed: geo.scroll_speed,
            });
        }
        if geo.parallax_factor <= 0 {
            return Err(ConfigError::ParallaxNotPositive {
                factor: geo.parallax_factor,
            });
        }
        check_range(
            "collision padding",
            geo.collision_padding.into(),
            0,
            MAX_PIXELS.into(),
        )?;

        if bird.standby_speed <= 0 || bird.standby_accel <= 0 {
            return Err(ConfigError::StandbyOscillation {
                speed: bird.standby_speed,
                accel: bird.standby_accel,
            });
        }
        if bird.launch_velocity >= 0 {
            return Err(ConfigError::LaunchNotUpward {
                launch_velocity: bird.launch_velocity,
            });
        }
        if bird.gravity <= 0 {
            return Err(ConfigError::GravityNotPositive {
                gravity: bird.gravity,
            });
        }
        check_range("standby speed", bird.standby_speed.into(), 1, MAX_PIXELS.into())?;
        check_range("standby acceleration", bird.standby_accel.into(), 1, MAX_PIXELS.into())?;
        check_range(
            "launch velocity",
            bird.launch_velocity.into(),
            -i64::from(MAX_PIXELS),
            -1,
        )?;
        check_range("gravity", bird.gravity.into(), 1, MAX_PIXELS.into())?;
        if -bird.launch_velocity < bird.gravity {
            return Err(ConfigError::LaunchWeakerThanGravity {
                launch_velocity: bird.launch_velocity,
                gravity: bird.gravity,
            });
        }
        if !(bird.rising_max_angle < bird.falling_max_angle) {
            return Err(ConfigError::AngleRange {
                rising: bird.rising_max_angle,
                falling: bird.falling_max_angle,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::TickIntervalZero);
        }
        if self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(ConfigError::OutOfRange {
                what: "tick interval",
                value: self.tick_interval_ms as i64,
                min: 1,
                max: MAX_TICK_INTERVAL_MS as i64,
            });
        }
        Ok(())
    }
}

pub(crate) fn check_range(
    what: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            what,
            value,
            min,
            max,
        });
    }
    Ok(())
}
