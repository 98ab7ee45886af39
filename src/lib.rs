//! Grendel Invaders - a word-invaders arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, squad, collisions, particles)
//! - `renderer`: Drawing surface abstraction and vertex tessellation
//! - `platform`: Input snapshot handling
//! - `hud`: Score/lives overlay and start screen
//! - `settings`: Data-driven configuration

pub mod error;
pub mod game;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size in pixels
    pub const CANVAS_WIDTH: f32 = 640.0;
    pub const CANVAS_HEIGHT: f32 = 640.0;

    /// Largest delta a single frame may advance the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 175.0;
    pub const PLAYER_LIVES: u32 = 3;
    pub const PLAYER_SCALE: f32 = 0.85;
    /// Source clip of the player sprite (unscaled)
    pub const PLAYER_CLIP_W: f32 = 62.0;
    pub const PLAYER_CLIP_H: f32 = 32.0;
    /// Player spawn sits this far above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 70.0;
    /// Minimum seconds between player shots
    pub const SHOT_COOLDOWN: f32 = 0.5;

    /// Bullet image is a 2x8 white bar
    pub const BULLET_W: f32 = 2.0;
    pub const BULLET_H: f32 = 8.0;
    pub const PLAYER_BULLET_SPEED: f32 = 1000.0;
    pub const ENEMY_BULLET_SPEED: f32 = 500.0;

    /// Squad grid layout
    pub const SQUAD_COLUMNS: usize = 11;
    pub const SQUAD_ROWS: usize = 5;
    pub const SQUAD_SIZE: usize = SQUAD_COLUMNS * SQUAD_ROWS;
    pub const ALIEN_X_MARGIN: f32 = 40.0;
    pub const ALIEN_Y_SPACING: f32 = 40.0;
    pub const ALIEN_SQUAD_WIDTH: f32 = SQUAD_COLUMNS as f32 * ALIEN_X_MARGIN;
    pub const ALIEN_FONT_SIZE: f32 = 12.0;

    /// Squad movement
    pub const SQUAD_STEP_X: f32 = 10.0;
    pub const SQUAD_DESCEND: f32 = 25.0;
    pub const SQUAD_EDGE_MARGIN: f32 = 20.0;
    /// Enemies stepping below this line end the session
    pub const INVASION_LINE: f32 = CANVAS_WIDTH - 50.0;
    pub const MIN_STEP_DELAY: f32 = 0.05;

    /// Points per destroyed enemy
    pub const ENEMY_SCORE: u64 = 25;

    /// Free-list capacity of the particle pool
    pub const PARTICLE_POOL_CAPACITY: usize = 100;
}

/// Round half up the way pixel boxes are snapped: `floor(0.5 + value)`
#[inline]
pub fn round_half_up(value: f32) -> f32 {
    (0.5 + value).floor()
}

/// Closed-interval membership test
#[inline]
pub fn value_in_range(value: f32, min: f32, max: f32) -> bool {
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(52.7), 53.0);
        assert_eq!(round_half_up(27.2), 27.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-0.5), 0.0);
    }

    #[test]
    fn test_value_in_range_is_closed() {
        assert!(value_in_range(1.0, 1.0, 2.0));
        assert!(value_in_range(2.0, 1.0, 2.0));
        assert!(!value_in_range(2.001, 1.0, 2.0));
    }
}
