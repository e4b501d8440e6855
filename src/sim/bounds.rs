//! Integer rectangle geometry
//!
//! Screen coordinates: x grows to the right, y grows downward. A rectangle
//! spans `left..right` and `top..bottom`.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size centred on a point. Odd sizes put the
    /// extra pixel on the right/bottom.
    pub fn centered(center: IVec2, width: i32, height: i32) -> Self {
        let left = center.x - width / 2;
        let top = center.y - height / 2;
        Self::new(left, top, left + width, top + height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Translate in place
    #[inline]
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.left, self.top)
    }

    /// Centre point, used as the rotation pivot when drawing
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) as f32 * 0.5,
            (self.top + self.bottom) as f32 * 0.5,
        )
    }

    /// Amount by which the horizontal extents overlap (negative when apart)
    pub fn horizontal_overlap(&self, other: &Bounds) -> i32 {
        self.right.min(other.right) - self.left.max(other.left)
    }
}
