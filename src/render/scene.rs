//! Snapshot of the world as an ordered list of sprites

use glam::Vec2;

use super::instance::{SpriteInstance, SpriteKind};
use crate::sim::{Bird, World};

/// Sprites in draw order: sky, pipes, ground, bird
#[derive(Debug, Clone, Default)]
pub struct Scene {
    instances: Vec<SpriteInstance>,
}

impl Scene {
    /// Read the current world and bird state. Nothing is mutated.
    pub fn capture(world: &World, bird: &Bird) -> Self {
        let area = world.bounds();
        let width = area.width() as f32;
        let left = area.left as f32;
        let top = area.top as f32;
        let ground_top = world.ground_top() as f32;

        let mut instances = Vec::with_capacity(5 + 2 * world.pipes().len());

        // Two tiles per scrolling layer so the seam never shows
        let sky_x = left + world.sky_offset() as f32;
        for i in 0..2 {
            instances.push(SpriteInstance::quad(
                SpriteKind::Sky,
                sky_x + i as f32 * width,
                top,
                width,
                ground_top - top,
            ));
        }

        for pipe in world.pipes().iter() {
            let b = &pipe.bounds;
            let x = b.left as f32;
            let w = b.width() as f32;
            instances.push(SpriteInstance::quad(
                SpriteKind::PipeUpper,
                x,
                b.top as f32,
                w,
                (pipe.gap_bottom - b.top) as f32,
            ));
            instances.push(SpriteInstance::quad(
                SpriteKind::PipeLower,
                x,
                pipe.gap_top as f32,
                w,
                (b.bottom - pipe.gap_top) as f32,
            ));
        }

        let ground_x = left + world.ground_offset() as f32;
        let ground_height = area.bottom as f32 - ground_top;
        for i in 0..2 {
            instances.push(SpriteInstance::quad(
                SpriteKind::Ground,
                ground_x + i as f32 * width,
                ground_top,
                width,
                ground_height,
            ));
        }

        let body = bird.bounds();
        let corner = body.top_left().as_vec2();
        let mut sprite = SpriteInstance::quad(
            SpriteKind::Bird,
            corner.x,
            corner.y,
            body.width() as f32,
            body.height() as f32,
        )
        .with_rotation(bird.rotation());
        sprite.pivot = body.center().to_array();
        instances.push(sprite);

        Self { instances }
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Raw bytes, ready for an instance buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Bird sprite, always drawn last
    pub fn bird(&self) -> Option<&SpriteInstance> {
        self.instances.last()
    }

    /// Center of the bird sprite
    pub fn bird_center(&self) -> Option<Vec2> {
        self.bird().map(|s| Vec2::from(s.pivot))
    }
}
