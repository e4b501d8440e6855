//! Instance records for 2D sprite rendering

use bytemuck::{Pod, Zeroable};

/// What a sprite instance depicts
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Sky = 0,
    Ground = 1,
    PipeUpper = 2,
    PipeLower = 3,
    Bird = 4,
}

impl SpriteKind {
    /// Flat fill color, used when no texture is bound for this kind
    pub const fn color(self) -> [f32; 4] {
        match self {
            SpriteKind::Sky => colors::SKY,
            SpriteKind::Ground => colors::GROUND,
            SpriteKind::PipeUpper | SpriteKind::PipeLower => colors::PIPE,
            SpriteKind::Bird => colors::BIRD,
        }
    }
}

/// One textured quad, in world pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Rotation center
    pub pivot: [f32; 2],
    /// Degrees, positive is clockwise (nose down)
    pub rotation: f32,
    pub kind: u32,
    pub color: [f32; 4],
}

impl SpriteInstance {
    /// Axis-aligned quad, rotating about its own center
    pub fn quad(kind: SpriteKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            position: [x, y],
            size: [w, h],
            pivot: [x + w * 0.5, y + h * 0.5],
            rotation: 0.0,
            kind: kind as u32,
            color: kind.color(),
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.31, 0.75, 0.79, 1.0];
    pub const GROUND: [f32; 4] = [0.87, 0.85, 0.58, 1.0];
    pub const PIPE: [f32; 4] = [0.45, 0.75, 0.18, 1.0];
    pub const BIRD: [f32; 4] = [0.98, 0.78, 0.2, 1.0];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        // 12 tightly packed 4-byte fields
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 48);
        let quad = SpriteInstance::quad(SpriteKind::Bird, 10.0, 20.0, 4.0, 6.0);
        let bytes: &[u8] = bytemuck::bytes_of(&quad);
        assert_eq!(bytes.len(), 48);
    }

    #[test]
    fn test_quad_pivot_is_center() {
        let quad = SpriteInstance::quad(SpriteKind::Bird, 180.0, 580.0, 120.0, 120.0)
            .with_rotation(-30.0);
        assert_eq!(quad.pivot, [240.0, 640.0]);
        assert_eq!(quad.rotation, -30.0);
        assert_eq!(quad.kind, 4);
        assert_eq!(quad.color, colors::BIRD);
    }
}
