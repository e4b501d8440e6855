//! Crash and scoring checks between the bird and the world
//!
//! All checks are pure functions over rectangles. A padding of a few pixels
//! is granted everywhere so grazing a sprite edge does not end the round.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::pipe::PipePair;

/// What the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Ground,
    Obstacle,
}

/// Bird has sunk more than `padding` pixels into the ground
#[inline]
pub fn ground_collision(bird: &Bounds, ground_top: i32, padding: i32) -> bool {
    bird.bottom - ground_top > padding
}

/// Bird and pipe column overlap horizontally by at least `padding` pixels
#[inline]
pub fn overlaps_column(bird: &Bounds, pipe: &PipePair, padding: i32) -> bool {
    pipe.bounds.left - bird.right <= -padding && bird.left - pipe.bounds.right <= -padding
}

/// Bird pokes more than `padding` pixels past either edge of the opening
#[inline]
pub fn outside_gap(bird: &Bounds, pipe: &PipePair, padding: i32) -> bool {
    pipe.gap_bottom - bird.top > padding || bird.bottom - pipe.gap_top > padding
}

pub fn pipe_collision(bird: &Bounds, pipe: &PipePair, padding: i32) -> bool {
    overlaps_column(bird, pipe, padding) && outside_gap(bird, pipe, padding)
}

/// First crash found, ground before pipes
pub fn detect_collision<'a>(
    bird: &Bounds,
    ground_top: i32,
    pipes: impl IntoIterator<Item = &'a PipePair>,
    padding: i32,
) -> Option<CollisionKind> {
    if ground_collision(bird, ground_top, padding) {
        return Some(CollisionKind::Ground);
    }
    pipes
        .into_iter()
        .any(|pipe| pipe_collision(bird, pipe, padding))
        .then_some(CollisionKind::Obstacle)
}

/// Bird's left edge has just cleared the pipe's right edge.
///
/// The window is one scroll step wide, so each pipe reports exactly one
/// tick as it slides past.
#[inline]
pub fn passed_pipe(bird: &Bounds, pipe: &PipePair, scroll_speed: i32) -> bool {
    bird.left > pipe.bounds.right && bird.left <= pipe.bounds.right + scroll_speed
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD: i32 = 20;

    fn pipe_at(left: i32) -> PipePair {
        PipePair {
            bounds: Bounds::new(left, 0, left + 130, 1024),
            gap_bottom: 384,
            gap_top: 768,
        }
    }

    fn bird_at(left: i32, top: i32) -> Bounds {
        Bounds::new(left, top, left + 120, top + 120)
    }

    #[test]
    fn test_ground_collision_threshold() {
        assert!(!ground_collision(&bird_at(0, 1024 - 120 + 20), 1024, PAD));
        assert!(ground_collision(&bird_at(0, 1024 - 120 + 21), 1024, PAD));
    }

    #[test]
    fn test_bird_inside_gap_is_safe() {
        let pipe = pipe_at(200);
        assert!(!pipe_collision(&bird_at(220, 500), &pipe, PAD));
        // Grazing the upper edge within padding is allowed
        assert!(!pipe_collision(&bird_at(220, 384 - 20), &pipe, PAD));
        assert!(pipe_collision(&bird_at(220, 384 - 21), &pipe, PAD));
        // Same for the lower edge
        assert!(!pipe_collision(&bird_at(220, 768 - 120 + 20), &pipe, PAD));
        assert!(pipe_collision(&bird_at(220, 768 - 120 + 21), &pipe, PAD));
    }

    #[test]
    fn test_horizontal_padding() {
        let pipe = pipe_at(200);
        // Bird right edge 19px into the column: ignored
        assert!(!overlaps_column(&bird_at(200 - 120 + 19, 0), &pipe, PAD));
        assert!(overlaps_column(&bird_at(200 - 120 + 20, 0), &pipe, PAD));
        // Bird left edge 19px before the column's right edge: ignored
        assert!(!overlaps_column(&bird_at(330 - 19, 0), &pipe, PAD));
        assert!(overlaps_column(&bird_at(330 - 20, 0), &pipe, PAD));
    }

    #[test]
    fn test_ground_takes_priority() {
        let pipes = [pipe_at(200)];
        let bird = bird_at(220, 930);
        assert_eq!(
            detect_collision(&bird, 1024, &pipes, PAD),
            Some(CollisionKind::Ground)
        );
        let bird = bird_at(220, 100);
        assert_eq!(
            detect_collision(&bird, 1024, &pipes, PAD),
            Some(CollisionKind::Obstacle)
        );
        let bird = bird_at(220, 500);
        assert_eq!(detect_collision(&bird, 1024, &pipes, PAD), None);
    }

    #[test]
    fn test_pass_window_is_one_step() {
        let speed = 30;
        let mut pipe = pipe_at(300);
        let bird = bird_at(240, 500);
        let mut hits = 0;
        for _ in 0..40 {
            if passed_pipe(&bird, &pipe, speed) {
                hits += 1;
            }
            pipe.roll(speed);
        }
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_pass_window_bounds() {
        let pipe = pipe_at(0); // right edge at 130
        assert!(!passed_pipe(&bird_at(130, 0), &pipe, 30));
        assert!(passed_pipe(&bird_at(131, 0), &pipe, 30));
        assert!(passed_pipe(&bird_at(160, 0), &pipe, 30));
        assert!(!passed_pipe(&bird_at(161, 0), &pipe, 30));
    }
}
