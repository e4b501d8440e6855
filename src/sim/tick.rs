//! Fixed timestep simulation tick
//!
//! Applies the tick's input, advances the world and then the bird, then
//! asks the world what the bird ran into or flew past.

use serde::Serialize;

use super::autopilot;
use super::collision::CollisionKind;
use super::state::{CueSink, GamePhase, GameState, SoundCue};

/// Input collected for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Taps since the last tick, applied in order
    pub taps: u32,
    /// Demo mode: the autopilot flaps (and starts rounds) by itself
    pub idle_mode: bool,
}

impl TickInput {
    pub fn tap() -> Self {
        Self {
            taps: 1,
            ..Default::default()
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub collision: Option<CollisionKind>,
    pub cues: Vec<SoundCue>,
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut cues = Vec::new();
    let collision = tick_with_sink(state, input, &mut cues);
    TickReport {
        tick: state.time_ticks,
        phase: state.phase,
        score: state.score,
        collision,
        cues,
    }
}

/// Same as [`tick`], streaming cues into `sink`. Returns the collision
/// detected this tick, if any.
pub fn tick_with_sink(
    state: &mut GameState,
    input: &TickInput,
    sink: &mut impl CueSink,
) -> Option<CollisionKind> {
    state.time_ticks += 1;

    for _ in 0..input.taps {
        handle_tap(state, sink);
    }
    if input.idle_mode
        && matches!(state.phase, GamePhase::Ready | GamePhase::Playing)
        && autopilot::wants_flap(&state.world, &state.bird)
    {
        handle_tap(state, sink);
    }

    state.world.step();
    // A bird on the game-over screen is lying on the ground
    if state.phase != GamePhase::Over {
        state.bird.step();
    }

    let mut collision = None;
    match state.phase {
        GamePhase::Playing => {
            collision = state.world.check_collision(&mut state.bird);
            match collision {
                Some(kind) => {
                    sink.play(SoundCue::Hit);
                    match kind {
                        CollisionKind::Ground => {
                            state.phase = GamePhase::Over;
                            log::info!("hit the ground, score {}", state.score);
                        }
                        CollisionKind::Obstacle => {
                            state.phase = GamePhase::Falling;
                            sink.play(SoundCue::Death);
                            log::info!("hit a pipe, score {}", state.score);
                        }
                    }
                }
                None => {
                    if state.world.has_passed(&state.bird) {
                        state.score += 1;
                        sink.play(SoundCue::Pass);
                        log::debug!("pipe cleared, score {}", state.score);
                    }
                }
            }
        }
        GamePhase::Falling => {
            collision = state.world.check_collision(&mut state.bird);
            if collision == Some(CollisionKind::Ground) {
                state.phase = GamePhase::Over;
                log::info!("landed, score {}", state.score);
            }
        }
        GamePhase::Ready | GamePhase::Over => {}
    }

    log::trace!(
        "tick {}: {:?}, bird {:?} v={}",
        state.time_ticks,
        state.phase,
        state.bird.bounds(),
        state.bird.velocity()
    );
    collision
}

/// One tap, interpreted by the current phase
fn handle_tap(state: &mut GameState, sink: &mut impl CueSink) {
    match state.phase {
        GamePhase::Ready => {
            state.start_round();
            sink.play(SoundCue::Launch);
        }
        GamePhase::Playing => {
            if state.bird.launch() {
                sink.play(SoundCue::Launch);
            }
        }
        GamePhase::Falling => {}
        GamePhase::Over => state.reset_round(),
    }
}
