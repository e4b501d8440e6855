//! Game state: one world, one bird and the round state machine around them

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::bounds::Bounds;
use super::world::World;
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird bobbing in place, waiting for the first tap
    Ready,
    /// Active flight
    Playing,
    /// Hit a pipe, dropping to the ground; taps ignored
    Falling,
    /// Bird on the ground; next tap resets
    Over,
}

/// Audio cue for the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Wing flap
    Launch,
    /// Pipe cleared
    Pass,
    /// Any crash
    Hit,
    /// Pipe crash, bird going down
    Death,
}

/// Receives cues as they are produced
pub trait CueSink {
    fn play(&mut self, cue: SoundCue);
}

impl CueSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub world: World,
    pub bird: Bird,
    pub phase: GamePhase,
    /// Pipes cleared this round
    pub score: u32,
    pub best_score: u32,
    /// Rounds started since creation (0 until the first tap)
    pub round: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Validate `config` and set up a world in standby with the bird bobbing
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let world = World::new(&config)?;
        let bounds = standby_bounds(world.bounds(), &config);
        let bird = Bird::new(bounds, config.bird.clone());
        log::info!("new game (seed {})", config.seed);
        Ok(Self {
            config,
            world,
            bird,
            phase: GamePhase::Ready,
            score: 0,
            best_score: 0,
            round: 0,
            time_ticks: 0,
        })
    }

    /// Move the bird to the launch spot and start scrolling
    pub fn start_round(&mut self) {
        self.world.start_scrolling();
        self.bird
            .set_bounds(launch_bounds(self.world.bounds(), &self.config));
        self.bird.launch();
        self.phase = GamePhase::Playing;
        self.round += 1;
        log::info!("round {} started", self.round);
    }

    /// Back to the ready screen after a round ends
    pub fn reset_round(&mut self) {
        self.best_score = self.best_score.max(self.score);
        self.score = 0;
        self.bird
            .set_bounds(standby_bounds(self.world.bounds(), &self.config));
        self.bird.enter_standby();
        self.world.enter_standby();
        self.phase = GamePhase::Ready;
        log::info!("ready (best {})", self.best_score);
    }
}

/// Bird rectangle centred on the world, where it bobs before a round
pub fn standby_bounds(world: &Bounds, config: &SimConfig) -> Bounds {
    let (w, h) = config.world.bird_size();
    let center = IVec2::new(
        world.left + world.width() / 2,
        world.top + world.height() / 2,
    );
    Bounds::centered(center, w, h)
}

/// Bird rectangle a third of the way across, where rounds are played
pub fn launch_bounds(world: &Bounds, config: &SimConfig) -> Bounds {
    let (w, h) = config.world.bird_size();
    let center = IVec2::new(
        world.left + world.width() / 3,
        world.top + world.height() / 2,
    );
    Bounds::centered(center, w, h)
}
