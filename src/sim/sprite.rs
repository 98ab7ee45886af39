//! Shared sprite base: position, scale and the derived bounding box
//!
//! Every entity embeds a [`Sprite`]. Two anchoring policies exist:
//! text draws from its origin, images are placed around their center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::round_half_up;

/// How `bounds` hangs off `position`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// Box starts at the position (text)
    Origin,
    /// Box is centered on the position (images)
    Center,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprite {
    pub position: Vec2,
    pub scale: Vec2,
    /// Unscaled width/height of the visual
    pub base_size: Vec2,
    pub anchor: Anchor,
    pub bounds: Rect,
}

impl Sprite {
    pub fn new(position: Vec2, base_size: Vec2, anchor: Anchor) -> Self {
        let mut sprite = Self {
            position,
            scale: Vec2::ONE,
            base_size,
            anchor,
            bounds: Rect::default(),
        };
        sprite.update_bounds();
        sprite
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self.update_bounds();
        self
    }

    /// Scaled size snapped to whole pixels
    pub fn scaled_size(&self) -> Vec2 {
        Vec2::new(
            round_half_up(self.base_size.x * self.scale.x),
            round_half_up(self.base_size.y * self.scale.y),
        )
    }

    /// Recompute `bounds` from position, size and scale
    pub fn update_bounds(&mut self) {
        let size = self.scaled_size();
        match self.anchor {
            Anchor::Origin => {
                self.bounds
                    .set(self.position.x, self.position.y, size.x, size.y);
            }
            Anchor::Center => {
                self.bounds.set(
                    self.position.x - size.x / 2.0,
                    self.position.y - size.y / 2.0,
                    size.x,
                    size.y,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_origin_anchor() {
        let sprite = Sprite::new(Vec2::new(100.0, 100.0), Vec2::new(36.0, 12.0), Anchor::Origin);
        assert_eq!(sprite.bounds, Rect::new(100.0, 100.0, 36.0, 12.0));
    }

    #[test]
    fn test_center_anchor_with_scale() {
        let sprite = Sprite::new(Vec2::new(320.0, 570.0), Vec2::new(62.0, 32.0), Anchor::Center)
            .with_scale(Vec2::splat(0.85));
        // 62 * 0.85 = 52.7 -> 53, 32 * 0.85 = 27.2 -> 27
        assert_eq!(sprite.bounds.w, 53.0);
        assert_eq!(sprite.bounds.h, 27.0);
        assert_eq!(sprite.bounds.x, 320.0 - 26.5);
        assert_eq!(sprite.bounds.y, 570.0 - 13.5);
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut sprite = Sprite::new(Vec2::ZERO, Vec2::new(2.0, 8.0), Anchor::Center);
        sprite.position.y = 50.0;
        sprite.update_bounds();
        assert_eq!(sprite.bounds, Rect::new(-1.0, 46.0, 2.0, 8.0));
    }

    proptest! {
        #[test]
        fn scaled_size_is_whole_pixels(w in 0.0f32..500.0, h in 0.0f32..500.0, s in 0.1f32..4.0) {
            let sprite = Sprite::new(Vec2::ZERO, Vec2::new(w, h), Anchor::Origin)
                .with_scale(Vec2::splat(s));
            let size = sprite.scaled_size();
            prop_assert_eq!(size.x.fract(), 0.0);
            prop_assert_eq!(size.y.fract(), 0.0);
            prop_assert!((size.x - w * s).abs() <= 0.5 + 1e-3);
        }
    }
}
