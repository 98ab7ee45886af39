//! Game settings
//!
//! Stored as JSON. Every field has a default, so a partial file only
//! overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::GlyphMetrics;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,

    /// Longest frame the simulation will integrate, in seconds
    pub max_frame_dt: f32,

    /// Particle effects (explosions)
    pub particles: bool,

    /// Kill enemy bullets once they leave the bottom of the playfield
    pub despawn_offscreen_enemy_bullets: bool,

    /// Seconds per blink phase of the start prompt
    pub blink_period: f32,

    /// Glyph metrics used to size enemy words
    pub glyphs: GlyphMetrics,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_frame_dt: MAX_FRAME_DT,
            particles: true,
            despawn_offscreen_enemy_bullets: true,
            blink_period: 0.5,
            glyphs: GlyphMetrics::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}): {}",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_frame_dt > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_frame_dt",
                reason: format!("must be positive, got {}", self.max_frame_dt),
            });
        }
        if !(self.blink_period > 0.0) {
            return Err(ConfigError::Invalid {
                field: "blink_period",
                reason: format!("must be positive, got {}", self.blink_period),
            });
        }
        if !(self.glyphs.advance_ratio > 0.0 && self.glyphs.line_height_ratio > 0.0) {
            return Err(ConfigError::Invalid {
                field: "glyphs",
                reason: "ratios must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Floor handed to enemy bullets
    pub fn enemy_bullet_floor(&self) -> Option<f32> {
        self.despawn_offscreen_enemy_bullets.then_some(CANVAS_HEIGHT)
    }
}
