//! Scrolling world: ground line, pipe spawning and crash checks
//!
//! The foreground (ground and pipes) scrolls `scroll_speed` pixels per
//! tick and the sky `parallax_factor` times slower. One foreground cycle
//! is `recycle_frames` ticks; the frame counter wraps after
//! `parallax_factor` cycles so both layers line up again.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::bounds::Bounds;
use super::collision::{CollisionKind, detect_collision, passed_pipe};
use super::pipe::TemplateSet;
use super::queue::{ObstacleQueue, SlotId};
use crate::config::{GeometryConfig, MAX_PIXELS, SimConfig, check_range};
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct World {
    bounds: Bounds,
    ground_top: i32,
    obstacle_width: i32,
    geometry: GeometryConfig,
    recycle_frames: i32,
    frame_count: i32,
    /// Frame on which the next pipe spawns; unset until scrolling starts
    next_spawn_frame: Option<i32>,
    templates: TemplateSet,
    pipes: ObstacleQueue,
    standby: bool,
    /// Set by the first fatal collision; stops all scrolling
    frozen: bool,
    last_collision: Option<CollisionKind>,
    rng: Pcg32,
}

impl World {
    /// World filling `config.world` with its top-left corner at the origin
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        let bounds = Bounds::new(0, 0, config.world.width, config.world.height);
        Self::with_bounds(bounds, config)
    }

    pub fn with_bounds(bounds: Bounds, config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = config.geometry.clone();
        let (ground_top, recycle_frames, templates) =
            Self::layout(&bounds, config.world.obstacle_width, &geometry)?;

        log::info!(
            "world {}x{}: ground at {}, {} gap placements, {} ticks per scroll cycle",
            bounds.width(),
            bounds.height(),
            ground_top,
            templates.len(),
            recycle_frames
        );

        // Pipes that fit between the spawn point and the left edge
        let spacing = geometry.scroll_speed * (recycle_frames / 2);
        let capacity = ((bounds.width() + config.world.obstacle_width) / spacing + 2) as usize;

        Ok(Self {
            bounds,
            ground_top,
            obstacle_width: config.world.obstacle_width,
            geometry,
            recycle_frames,
            frame_count: 0,
            next_spawn_frame: None,
            templates,
            pipes: ObstacleQueue::with_capacity(capacity),
            standby: true,
            frozen: false,
            last_collision: None,
            rng: Pcg32::seed_from_u64(config.seed),
        })
    }

    fn layout(
        bounds: &Bounds,
        obstacle_width: i32,
        geometry: &GeometryConfig,
    ) -> Result<(i32, i32, TemplateSet), ConfigError> {
        let limit = i64::from(MAX_PIXELS);
        for (what, value) in [
            ("world left", bounds.left),
            ("world top", bounds.top),
            ("world right", bounds.right),
            ("world bottom", bounds.bottom),
        ] {
            check_range(what, value.into(), -16 * limit, 16 * limit)?;
        }
        let width = i64::from(bounds.right) - i64::from(bounds.left);
        let height = i64::from(bounds.bottom) - i64::from(bounds.top);
        check_range("world width", width, 1, limit)?;
        check_range("world height", height, 1, limit)?;

        let recycle_frames = bounds.width() / geometry.scroll_speed;
        if recycle_frames < 2 {
            return Err(ConfigError::ScrollTooFast {
                width: bounds.width(),
                speed: geometry.scroll_speed,
            });
        }
        let ground_top = bounds.top + geometry.ground_line.of(bounds.height());
        let templates = TemplateSet::build(bounds, ground_top, obstacle_width, geometry)?;
        Ok((ground_top, recycle_frames, templates))
    }

    /// Move or resize the play-field. Templates are rebuilt and live pipes
    /// released; on error the world is left unchanged.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), ConfigError> {
        let (ground_top, recycle_frames, templates) =
            Self::layout(&bounds, self.obstacle_width, &self.geometry)?;
        self.bounds = bounds;
        self.ground_top = ground_top;
        self.recycle_frames = recycle_frames;
        self.templates = templates;
        self.pipes.clear();
        self.frame_count = 0;
        self.next_spawn_frame = None;
        log::info!(
            "world resized to {}x{}, {} gap placements",
            bounds.width(),
            bounds.height(),
            self.templates.len()
        );
        Ok(())
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn ground_top(&self) -> i32 {
        self.ground_top
    }

    pub fn scroll_speed(&self) -> i32 {
        self.geometry.scroll_speed
    }

    pub fn recycle_frames(&self) -> i32 {
        self.recycle_frames
    }

    /// Frame counter wraps at this value
    pub fn frame_cycle(&self) -> i32 {
        self.geometry.parallax_factor * self.recycle_frames
    }

    pub fn frame_count(&self) -> i32 {
        self.frame_count
    }

    pub fn next_spawn_frame(&self) -> Option<i32> {
        self.next_spawn_frame
    }

    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    pub fn pipes(&self) -> &ObstacleQueue {
        &self.pipes
    }

    pub fn is_standby(&self) -> bool {
        self.standby
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn last_collision(&self) -> Option<CollisionKind> {
        self.last_collision
    }

    /// Stop scrolling and clear the pipes, ready for a new round
    pub fn enter_standby(&mut self) {
        self.standby = true;
        self.frame_count = 0;
        self.pipes.clear();
    }

    /// Begin a round: scrolling starts on the next tick
    pub fn start_scrolling(&mut self) {
        self.standby = false;
        self.frozen = false;
        self.last_collision = None;
        self.next_spawn_frame = None;
    }

    /// Advance one tick: maybe spawn, then scroll
    pub fn step(&mut self) {
        if self.standby || self.frozen {
            return;
        }

        let cycle = self.frame_cycle();
        let next = *self.next_spawn_frame.get_or_insert(self.recycle_frames);
        if self.frame_count == next {
            self.spawn_or_recycle();
            let mut following = next + self.recycle_frames / 2;
            if following >= cycle {
                following -= cycle;
            }
            self.next_spawn_frame = Some(following);
        }

        self.frame_count += 1;
        self.pipes.roll_all(self.geometry.scroll_speed);

        if self.frame_count >= cycle {
            self.frame_count = 0;
        }
        log::trace!("world frame {}", self.frame_count);
    }

    /// Add a pipe with a random gap, reusing an off-screen slot when the
    /// oldest pipe has left the screen
    pub fn spawn_or_recycle(&mut self) -> SlotId {
        let template = *self.templates.choose(&mut self.rng);
        let pool_before = self.pipes.pool_size();
        let id = self.pipes.spawn(&template, self.bounds.left);
        log::debug!(
            "spawned pipe (gap {}..{}) in slot {}{}",
            template.gap_bottom,
            template.gap_top,
            id.index(),
            if self.pipes.pool_size() == pool_before {
                " (reused)"
            } else {
                ""
            }
        );
        id
    }

    /// Horizontal position of the sky layer
    pub fn sky_offset(&self) -> i32 {
        if self.standby {
            return 0;
        }
        -(self.frame_count * self.geometry.scroll_speed / self.geometry.parallax_factor)
    }

    /// Horizontal position of the ground layer
    pub fn ground_offset(&self) -> i32 {
        if self.standby {
            return 0;
        }
        -((self.frame_count % self.recycle_frames) * self.geometry.scroll_speed)
    }

    /// Check the bird against the ground and every pipe.
    ///
    /// Any hit freezes scrolling. Hitting the ground also kills the bird;
    /// after a pipe hit it keeps falling until it reaches the ground.
    pub fn check_collision(&mut self, bird: &mut Bird) -> Option<CollisionKind> {
        let kind = detect_collision(
            bird.bounds(),
            self.ground_top,
            self.pipes.iter(),
            self.geometry.collision_padding,
        )?;

        match kind {
            CollisionKind::Ground => {
                log::debug!(
                    "ground hit: bird bottom {} vs ground {}",
                    bird.bounds().bottom,
                    self.ground_top
                );
                bird.kill();
            }
            CollisionKind::Obstacle => {
                log::debug!("pipe hit: bird at {:?}", bird.bounds());
            }
        }
        self.frozen = true;
        self.last_collision = Some(kind);
        Some(kind)
    }

    /// True on the one tick the bird clears some pipe
    pub fn has_passed(&self, bird: &Bird) -> bool {
        self.pipes
            .iter()
            .any(|pipe| passed_pipe(bird.bounds(), pipe, self.geometry.scroll_speed))
    }
}
