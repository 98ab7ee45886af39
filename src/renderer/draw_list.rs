//! Recording surface
//!
//! Captures every draw call of a frame in order. Used by the headless
//! driver and by tests that assert on what a frame drew.

use super::{Color, GlyphMetrics, ImageId, Surface, TextMetrics};
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
    },
    Image {
        image: ImageId,
        dest: Rect,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    metrics: GlyphMetrics,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: GlyphMetrics) -> Self {
        Self {
            commands: Vec::new(),
            metrics,
        }
    }

    /// Drop the previous frame's commands
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of filled rects (particles are the only source of these)
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }

    pub fn image_count(&self, image: ImageId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Image { image: i, .. } if *i == image))
            .count()
    }

    /// Whether any text command drew exactly `text`
    pub fn contains_text(&self, text: &str) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::FillText { text: t, .. } if t == text))
    }
}

impl TextMetrics for DrawList {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.measure_text(text, font_size)
    }

    fn line_height(&self, font_size: f32) -> f32 {
        self.metrics.line_height(font_size)
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
    }

    fn draw_image(&mut self, image: ImageId, dest: Rect) {
        self.commands.push(DrawCommand::Image { image, dest });
    }
}
