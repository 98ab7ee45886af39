//! Session shell around the simulation
//!
//! Owns the state, the seeded RNG and the settings. Hosts call
//! [`Game::frame`] once per animation frame with the wall-clock delta.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::platform::{InputSource, Key};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, SimulationState, draw, tick};

pub struct Game {
    pub state: SimulationState,
    settings: Settings,
    seed: u64,
    rng: Pcg32,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        if let Err(err) = settings.validate() {
            log::warn!("Running with invalid settings: {}", err);
        }
        let seed = settings.seed.unwrap_or_else(clock_seed);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: SimulationState::with_settings(&settings),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run one frame: update, then draw. Returns the events it raised.
    ///
    /// `elapsed` is clamped to `[0, max_frame_dt]`; a NaN counts as zero.
    pub fn frame(
        &mut self,
        elapsed: f32,
        input: &dyn InputSource,
        surface: &mut dyn Surface,
    ) -> Vec<GameEvent> {
        let dt = elapsed.max(0.0).min(self.settings.max_frame_dt.max(0.0));
        self.state.time += dt;

        if self.state.phase == GamePhase::Attract && input.was_just_pressed(Key::Confirm) {
            self.state.start_session();
        }

        tick(&mut self.state, input, dt, &mut self.rng);
        draw(&mut self.state, surface, self.settings.blink_period);

        self.state.drain_events()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
