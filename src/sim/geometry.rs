//! Axis-aligned rectangles and the overlap test used by every collider
//!
//! Points are plain `glam::Vec2` values; only the box needs its own type.

use serde::{Deserialize, Serialize};

use crate::value_in_range;

/// An axis-aligned box, used both as draw placement and collision volume
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn set(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.x = x;
        self.y = y;
        self.w = w;
        self.h = h;
    }

    pub fn copy_from(&mut self, other: &Rect) {
        *self = *other;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Closed-interval overlap: boxes that share an edge count as touching
    pub fn overlaps(&self, other: &Rect) -> bool {
        let x_overlap = value_in_range(self.x, other.x, other.right())
            || value_in_range(other.x, self.x, self.right());
        let y_overlap = value_in_range(self.y, other.y, other.bottom())
            || value_in_range(other.y, self.y, self.bottom());
        x_overlap && y_overlap
    }
}
