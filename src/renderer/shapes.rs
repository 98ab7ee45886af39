//! Shape generation for 2D primitives
//!
//! Converts a recorded frame into triangles in clip space. Text is left to
//! the host's glyph renderer; images become flat-colored quads.

use super::draw_list::{DrawCommand, DrawList};
use super::vertex::Vertex;
use super::{Color, ImageId, colors};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::Rect;

/// Placeholder tint for image quads
fn image_color(image: ImageId) -> Color {
    match image {
        ImageId::Player => [0.55, 0.75, 0.35, 1.0],
        ImageId::Bullet => colors::WHITE,
    }
}

/// Map playfield pixels (origin top-left, y down) to clip space (y up)
#[inline]
pub fn to_clip(x: f32, y: f32) -> [f32; 2] {
    [x / CANVAS_WIDTH * 2.0 - 1.0, 1.0 - y / CANVAS_HEIGHT * 2.0]
}

/// Generate the two triangles covering `rect`
pub fn quad(rect: &Rect, color: Color) -> [Vertex; 6] {
    let [x0, y0] = to_clip(rect.x, rect.y);
    let [x1, y1] = to_clip(rect.right(), rect.bottom());

    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Tessellate every rect and image command of a frame, in draw order
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.len() * 6);

    for command in &list.commands {
        match command {
            DrawCommand::Clear(color) => {
                let full = Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
                vertices.extend_from_slice(&quad(&full, *color));
            }
            DrawCommand::FillRect { rect, color } => {
                vertices.extend_from_slice(&quad(rect, *color));
            }
            DrawCommand::Image { image, dest } => {
                vertices.extend_from_slice(&quad(dest, image_color(*image)));
            }
            DrawCommand::FillText { .. } => {}
        }
    }

    vertices
}
