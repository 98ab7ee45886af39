//! Drawing surface abstraction
//!
//! The simulation never talks to a canvas or GPU directly. It issues
//! rect/text/image calls against a [`Surface`]; hosts plug in whatever
//! backend they have. [`DrawList`] records the calls, and [`shapes`]
//! turns a recording into a vertex buffer.

pub mod draw_list;
pub mod shapes;
pub mod vertex;

pub use draw_list::{DrawCommand, DrawList};
pub use vertex::Vertex;

use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const GREEN: Color = [0.0, 0.5, 0.0, 1.0];
}

/// Returns `color` with its alpha multiplied by `alpha`
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Pre-rendered images the host must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageId {
    Player,
    Bullet,
}

/// Text measurement, shared by surfaces and the simulation
pub trait TextMetrics {
    /// Advance width of `text` at `font_size` pixels
    fn measure_text(&self, text: &str, font_size: f32) -> f32;
    /// Height of one line of text at `font_size` pixels
    fn line_height(&self, font_size: f32) -> f32;
}

/// A fixed-logical-size (640x640) target for draw calls
pub trait Surface: TextMetrics {
    /// Fill the whole playfield with `color`
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw `text` with its left baseline at (x, y)
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color);
    fn draw_image(&mut self, image: ImageId, dest: Rect);
}

/// Monospace metrics: every glyph advances by `advance_ratio * font_size`
///
/// Deterministic, so enemy boxes do not depend on which host renders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    pub advance_ratio: f32,
    pub line_height_ratio: f32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.0,
        }
    }
}

impl TextMetrics for GlyphMetrics {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.advance_ratio * font_size
    }

    fn line_height(&self, font_size: f32) -> f32 {
        self.line_height_ratio * font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_metrics() {
        let metrics = GlyphMetrics::default();
        assert!((metrics.measure_text("heard", 12.0) - 36.0).abs() < 1e-4);
        assert_eq!(metrics.measure_text("", 12.0), 0.0);
        assert_eq!(metrics.line_height(12.0), 12.0);
    }

    #[test]
    fn test_with_alpha() {
        let c = with_alpha(colors::WHITE, 0.25);
        assert_eq!(c, [1.0, 1.0, 1.0, 0.25]);
        assert_eq!(with_alpha(colors::WHITE, 3.0)[3], 1.0);
    }
}
