//! HUD and start screen text

use crate::consts::*;
use crate::renderer::{Color, Surface, colors};
use crate::round_half_up;
use crate::sim::Player;

pub const TITLE: &str = "Grendel Invaders";
pub const BYLINE: &str = "by Quinn Leader";
pub const PROMPT: &str = "Press enter to play!";

const HUD_FONT_SIZE: f32 = 20.0;

/// Draw `text` horizontally centered on `x`
pub fn fill_centered_text(
    surface: &mut dyn Surface,
    text: &str,
    x: f32,
    y: f32,
    font_size: f32,
    color: Color,
) {
    let width = surface.measure_text(text, font_size);
    surface.fill_text(text, x - width / 2.0, y, font_size, color);
}

/// Whether blinking text is showing at `time` seconds
pub fn blink_visible(time: f32, period: f32) -> bool {
    if period <= 0.0 {
        return true;
    }
    (round_half_up(time / period) as i64) % 2 == 1
}

/// Centered text that is only drawn on odd half-periods
#[allow(clippy::too_many_arguments)]
pub fn fill_blinking_text(
    surface: &mut dyn Surface,
    text: &str,
    x: f32,
    y: f32,
    font_size: f32,
    color: Color,
    time: f32,
    period: f32,
) {
    if blink_visible(time, period) {
        fill_centered_text(surface, text, x, y, font_size, color);
    }
}

/// Lives in the bottom-left corner, score across the top
pub fn draw_bottom_hud(surface: &mut dyn Surface, player: &Player) {
    let lives = format!("{} x ", player.lives);
    surface.fill_text(&lives, 10.0, CANVAS_HEIGHT - 7.5, HUD_FONT_SIZE, colors::WHITE);

    let score = format!("SCORE: {}", player.score);
    fill_centered_text(
        surface,
        &score,
        CANVAS_WIDTH / 2.0,
        20.0,
        HUD_FONT_SIZE,
        colors::WHITE,
    );
}

pub fn draw_start_screen(surface: &mut dyn Surface, time: f32, blink_period: f32) {
    let center_x = CANVAS_WIDTH / 2.0;
    fill_centered_text(surface, TITLE, center_x, CANVAS_HEIGHT / 2.75, 36.0, colors::WHITE);
    fill_centered_text(surface, BYLINE, center_x, CANVAS_HEIGHT / 2.0, 24.0, colors::WHITE);
    fill_blinking_text(
        surface,
        PROMPT,
        center_x,
        CANVAS_HEIGHT / 1.5,
        36.0,
        colors::WHITE,
        time,
        blink_period,
    );
}
