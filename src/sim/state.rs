//! Game state and lifecycle events
//!
//! Everything the tick mutates lives in one [`SimulationState`] value that
//! the orchestrator owns and passes around explicitly.

use serde::{Deserialize, Serialize};

use super::entity::Player;
use super::particles::ParticleExplosion;
use super::squad::Squad;
use crate::renderer::GlyphMetrics;
use crate::settings::Settings;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, waiting for the confirm key
    Attract,
    /// A session is running
    Playing,
}

/// Signals emitted to the surrounding shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    /// Hit with no lives left; back to the start screen
    SessionOver { score: u64, wave: u32 },
    /// Squad exterminated; `wave` is the wave now starting
    WaveCleared { wave: u32 },
    EnemyDestroyed { word: String, score: u64 },
    PlayerHit { lives: u32 },
    /// The squad reached the bottom and the session was reset
    Invaded,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub phase: GamePhase,
    pub player: Player,
    pub squad: Squad,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleExplosion,
    /// Metrics used to size enemy words
    pub glyphs: GlyphMetrics,
    /// Seconds of (clamped) time fed to the game so far
    pub time: f32,
    pub(crate) events: Vec<GameEvent>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(GlyphMetrics::default())
    }
}

impl SimulationState {
    pub fn new(glyphs: GlyphMetrics) -> Self {
        Self {
            phase: GamePhase::Attract,
            player: Player::new(),
            squad: Squad::new(&glyphs),
            particles: ParticleExplosion::new(),
            glyphs,
            time: 0.0,
            events: Vec::new(),
        }
    }

    /// State configured from settings
    pub fn with_settings(settings: &Settings) -> Self {
        let mut state = Self::new(settings.glyphs);
        state.particles.enabled = settings.particles;
        state.squad.enemy_bullet_floor = settings.enemy_bullet_floor();
        state
    }

    /// Fresh player and squad, then start playing
    pub fn start_session(&mut self) {
        self.player = Player::new();
        self.squad.reset(&self.glyphs);
        self.particles.clear();
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::SessionStarted);
        log::info!("Session started");
    }

    /// Invasion: respawn the squad at wave 1 and reset the player in place
    pub fn reset_session(&mut self) {
        self.squad.reset(&self.glyphs);
        self.player.reset();
        self.push_event(GameEvent::Invaded);
    }

    /// Lives exhausted: report and return to the start screen
    pub fn end_session(&mut self) {
        let score = self.player.score;
        let wave = self.squad.wave;
        self.phase = GamePhase::Attract;
        self.push_event(GameEvent::SessionOver { score, wave });
        log::info!("Session over: score {} on wave {}", score, wave);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
