//! The flying body: vertical kinematics, nose rotation and flight mode
//!
//! Integer pixels per tick for motion, degrees for rotation. Positive y is
//! down, so a negative velocity rises and a negative angle tilts the nose up.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::config::BirdTuning;

/// Flight mode state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightMode {
    /// Idle bobbing before a round starts
    Standby,
    /// Free flight under gravity after a flap
    Launched,
    /// Falling to the ground after a crash, no rotation
    Dead,
}

/// Vertical velocity and acceleration, pixels per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KinematicState {
    pub velocity: i32,
    pub acceleration: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    bounds: Bounds,
    kinematics: KinematicState,
    /// Current nose angle in degrees
    rotation: f32,
    /// Degrees added to the rotation each tick
    angular_speed: f32,
    mode: FlightMode,
    tuning: BirdTuning,
}

impl Bird {
    /// Create a bird at `bounds`, already in standby
    pub fn new(bounds: Bounds, tuning: BirdTuning) -> Self {
        let mut bird = Self {
            bounds,
            kinematics: KinematicState::default(),
            rotation: 0.0,
            angular_speed: 0.0,
            mode: FlightMode::Standby,
            tuning,
        };
        bird.enter_standby();
        bird
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Reassign position and size (input adapter moves the bird between
    /// the standby and launch spots)
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn kinematics(&self) -> KinematicState {
        self.kinematics
    }

    pub fn velocity(&self) -> i32 {
        self.kinematics.velocity
    }

    pub fn acceleration(&self) -> i32 {
        self.kinematics.acceleration
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    pub fn is_dead(&self) -> bool {
        self.mode == FlightMode::Dead
    }

    /// Start bobbing in place: rising at full standby speed, decelerating.
    /// Also the only way out of `Dead`.
    pub fn enter_standby(&mut self) {
        self.mode = FlightMode::Standby;
        self.kinematics = KinematicState {
            velocity: -self.tuning.standby_speed,
            acceleration: self.tuning.standby_accel,
        };
        self.rotation = 0.0;
        self.angular_speed = 0.0;
    }

    /// Flap. Returns false (and does nothing) once dead.
    pub fn launch(&mut self) -> bool {
        if self.mode == FlightMode::Dead {
            log::debug!("launch ignored: bird is dead");
            return false;
        }
        self.mode = FlightMode::Launched;
        self.kinematics = KinematicState {
            velocity: self.tuning.launch_velocity,
            acceleration: self.tuning.gravity,
        };
        let frames = self.tuning.frames_to_apex();
        self.aim_rotation(self.tuning.rising_max_angle, frames);
        true
    }

    /// Crash: drop from rest under gravity, rotation frozen
    pub fn kill(&mut self) {
        self.mode = FlightMode::Dead;
        self.kinematics = KinematicState {
            velocity: 0,
            acceleration: self.tuning.gravity,
        };
    }

    /// Advance one tick: position, then velocity, then rotation
    pub fn step(&mut self) {
        self.bounds.offset(0, self.kinematics.velocity);

        match self.mode {
            FlightMode::Standby => self.step_standby(),
            FlightMode::Launched => {
                let before = self.kinematics.velocity;
                self.kinematics.velocity += self.kinematics.acceleration;
                // Apex: velocity turned from rising/still to falling this tick
                if before <= 0 && self.kinematics.velocity > 0 {
                    let frames = self.tuning.descent_frames();
                    self.aim_rotation(self.tuning.falling_max_angle, frames);
                }
                self.rotate();
            }
            FlightMode::Dead => {
                self.kinematics.velocity += self.kinematics.acceleration;
            }
        }
    }

    /// Triangle-wave bob between -standby_speed and +standby_speed
    fn step_standby(&mut self) {
        let max = self.tuning.standby_speed;
        let accel = self.tuning.standby_accel;
        let k = &mut self.kinematics;
        if k.velocity <= -max {
            k.acceleration = accel;
        } else if k.velocity >= max {
            k.acceleration = -accel;
        }
        k.velocity = (k.velocity + k.acceleration).clamp(-max, max);
    }

    fn aim_rotation(&mut self, to_angle: f32, frames: i32) {
        self.angular_speed = (to_angle - self.rotation) / frames as f32;
    }

    /// Apply angular speed unless it would leave the allowed range
    fn rotate(&mut self) {
        let angle = self.rotation + self.angular_speed;
        if angle >= self.tuning.rising_max_angle && angle <= self.tuning.falling_max_angle {
            self.rotation = angle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird() -> Bird {
        Bird::new(Bounds::new(300, 580, 420, 700), BirdTuning::default())
    }

    #[test]
    fn test_new_bird_is_standby() {
        let b = bird();
        assert_eq!(b.mode(), FlightMode::Standby);
        assert_eq!(b.velocity(), -10);
        assert_eq!(b.acceleration(), 1);
    }

    #[test]
    fn test_standby_oscillation_period() {
        let mut b = bird();
        let start_top = b.bounds().top;
        let mut velocities = Vec::new();

        for _ in 0..80 {
            velocities.push(b.velocity());
            b.step();
            assert!((-10..=10).contains(&b.velocity()));
            assert_eq!(b.rotation(), 0.0);
        }

        // One sweep from -10 to +10 takes 20 ticks
        assert_eq!(velocities[20], 10);
        // Full cycle is 40 ticks
        assert_eq!(&velocities[..40], &velocities[40..]);
        assert_eq!(b.bounds().top, start_top);

        let mut b = bird();
        for _ in 0..40 {
            b.step();
        }
        assert_eq!(b.bounds().top, start_top);
        assert_eq!(b.velocity(), -10);
    }

    #[test]
    fn test_standby_overshoot_still_reverses() {
        let tuning = BirdTuning {
            standby_speed: 10,
            standby_accel: 3,
            ..Default::default()
        };
        let mut b = Bird::new(Bounds::new(0, 0, 10, 10), tuning);
        let mut saw_positive_peak = false;
        for _ in 0..100 {
            b.step();
            assert!((-10..=10).contains(&b.velocity()));
            if b.velocity() == 10 {
                saw_positive_peak = true;
            }
        }
        assert!(saw_positive_peak);
        // Still oscillating, not stuck at a bound
        let v0 = b.velocity();
        b.step();
        assert_ne!(v0, b.velocity());
    }

    #[test]
    fn test_launch_sets_impulse_and_rotation_target() {
        let mut b = bird();
        assert!(b.launch());
        assert_eq!(b.mode(), FlightMode::Launched);
        assert_eq!(b.velocity(), -80);
        assert_eq!(b.acceleration(), 20);
        // Reaches -30 over 4 ticks from 0
        assert_eq!(b.angular_speed(), -7.5);
    }

    #[test]
    fn test_launched_trajectory() {
        let mut b = bird();
        let top = b.bounds().top;
        b.launch();
        b.step();
        assert_eq!(b.bounds().top, top - 80);
        assert_eq!(b.velocity(), -60);
        assert_eq!(b.rotation(), -7.5);
    }

    #[test]
    fn test_rotation_arc_after_launch() {
        let mut b = bird();
        b.launch();

        let mut angles = vec![b.rotation()];
        let mut apex_tick = None;
        for tick in 1..=30 {
            b.step();
            angles.push(b.rotation());
            if apex_tick.is_none() && b.velocity() == b.acceleration() {
                apex_tick = Some(tick);
            }
            assert!(b.rotation() >= -30.0 && b.rotation() <= 70.0);
        }

        let apex = apex_tick.expect("apex reached");
        assert_eq!(apex, 5);
        // Nose rises until the apex tick...
        for w in angles[..apex].windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(angles[4], -30.0);
        // ...then drops and settles at the falling limit
        for w in angles[apex - 1..].windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert_eq!(b.rotation(), 70.0);
    }

    #[test]
    fn test_descent_rotation_speed() {
        let mut b = bird();
        b.launch();
        for _ in 0..5 {
            b.step();
        }
        // From -30 to 70 over 8 ticks
        assert_eq!(b.angular_speed(), 12.5);
        assert_eq!(b.rotation(), -17.5);
    }

    #[test]
    fn test_kill_freezes_rotation() {
        let mut b = bird();
        b.launch();
        b.step();
        b.step();
        let angle = b.rotation();

        b.kill();
        assert_eq!(b.velocity(), 0);
        assert_eq!(b.acceleration(), 20);

        let top = b.bounds().top;
        for _ in 0..5 {
            b.step();
        }
        assert_eq!(b.rotation(), angle);
        // 0 + 20 + 40 + 60 + 80
        assert_eq!(b.bounds().top, top + 200);
    }

    #[test]
    fn test_dead_bird_refuses_launch() {
        let mut b = bird();
        b.kill();
        assert!(!b.launch());
        assert!(b.is_dead());

        b.enter_standby();
        assert_eq!(b.mode(), FlightMode::Standby);
        assert!(b.launch());
    }

    #[test]
    fn test_enter_standby_resets_rotation() {
        let mut b = bird();
        b.launch();
        for _ in 0..20 {
            b.step();
        }
        assert_eq!(b.rotation(), 70.0);
        b.enter_standby();
        assert_eq!(b.rotation(), 0.0);
        assert_eq!(b.angular_speed(), 0.0);
    }

    #[test]
    fn test_apex_without_zero_velocity() {
        // Velocity goes -70, -50, -30, -10, +10: never equal to gravity
        let tuning = BirdTuning {
            launch_velocity: -70,
            gravity: 20,
            ..BirdTuning::default()
        };
        let mut b = Bird::new(Bounds::new(180, 580, 300, 700), tuning);
        assert!(b.launch());
        assert_eq!(b.angular_speed(), -10.0);

        for _ in 0..3 {
            b.step();
        }
        assert_eq!(b.velocity(), -10);
        assert_eq!(b.rotation(), -30.0);

        // The -10 -> +10 tick re-aims the nose down over 7 ticks
        b.step();
        assert_eq!(b.velocity(), 10);
        assert!((b.angular_speed() - 100.0 / 7.0).abs() < 1e-4);

        let mut previous = b.rotation();
        for _ in 0..20 {
            b.step();
            assert!(b.rotation() >= -30.0 && b.rotation() <= 70.0);
            assert!(b.rotation() >= previous);
            previous = b.rotation();
        }
        assert!((b.rotation() - 70.0).abs() < 1e-3);
    }
}
