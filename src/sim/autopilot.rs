//! Demo player
//!
//! Flaps whenever the bird is about to sink below the opening of the next
//! pipe it has not cleared yet. Purely a function of the current state, so
//! demo runs stay deterministic.

use super::bird::{Bird, FlightMode};
use super::pipe::PipePair;
use super::world::World;

/// How far below the lower gap edge the bird's bottom may sink (pixels),
/// kept just under the collision padding
const SINK_ALLOWANCE: i32 = 16;

/// Next pipe whose right edge the bird has not cleared
pub fn next_pipe<'a>(world: &'a World, bird: &Bird) -> Option<&'a PipePair> {
    world
        .pipes()
        .iter()
        .find(|pipe| pipe.bounds.right >= bird.bounds().left)
}

/// Lowest allowed position for the bird's bottom edge this tick
pub fn sink_line(world: &World, bird: &Bird) -> i32 {
    match next_pipe(world, bird) {
        Some(pipe) => pipe.gap_top + SINK_ALLOWANCE,
        // Open sky: cruise two bird-heights above the ground
        None => world.ground_top() - 2 * bird.bounds().height(),
    }
}

/// Whether to flap this tick
pub fn wants_flap(world: &World, bird: &Bird) -> bool {
    match bird.mode() {
        FlightMode::Standby => true,
        FlightMode::Dead => false,
        FlightMode::Launched => {
            if bird.velocity() < 0 {
                return false;
            }
            bird.bounds().bottom + bird.velocity() > sink_line(world, bird)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::Bounds;

    fn setup() -> (World, Bird) {
        let config = SimConfig::default();
        let world = World::new(&config).unwrap();
        let bird = Bird::new(Bounds::new(180, 580, 300, 700), config.bird);
        (world, bird)
    }

    #[test]
    fn test_standby_bird_flaps() {
        let (world, bird) = setup();
        assert!(wants_flap(&world, &bird));
    }

    #[test]
    fn test_dead_bird_never_flaps() {
        let (world, mut bird) = setup();
        bird.kill();
        assert!(!wants_flap(&world, &bird));
    }

    #[test]
    fn test_rising_bird_does_not_flap() {
        let (world, mut bird) = setup();
        bird.set_bounds(Bounds::new(180, 880, 300, 1000));
        bird.launch();
        assert!(!wants_flap(&world, &bird));
    }

    #[test]
    fn test_cruise_without_pipes() {
        let (world, mut bird) = setup();
        bird.launch();
        // Fall until the velocity turns downward
        while bird.velocity() < 0 {
            bird.step();
        }
        // Cruise line is 1024 - 240 = 784
        bird.set_bounds(Bounds::new(180, 600, 300, 720));
        assert!(!wants_flap(&world, &bird));
        bird.set_bounds(Bounds::new(180, 700, 300, 820));
        assert!(wants_flap(&world, &bird));
    }

    #[test]
    fn test_targets_next_uncleared_pipe() {
        let (mut world, mut bird) = setup();
        world.start_scrolling();
        for _ in 0..25 {
            world.step();
        }
        let pipe = *world.pipes().head().unwrap().1;
        assert_eq!(next_pipe(&world, &bird), Some(&pipe));
        assert_eq!(sink_line(&world, &bird), pipe.gap_top + SINK_ALLOWANCE);

        // Once cleared, fall back to cruising
        bird.set_bounds(Bounds::new(900, 580, 1020, 700));
        assert_eq!(next_pipe(&world, &bird), None);
    }
}
