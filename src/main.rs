//! Grendel Invaders entry point
//!
//! Headless native driver: runs the full frame loop against a recording
//! surface with a simple autopilot at the keys, and logs what happens.
//!
//! Usage: `grendel-invaders [settings.json] [frames]`

use grendel_invaders::platform::{Key, KeyboardState};
use grendel_invaders::renderer::{DrawList, shapes};
use grendel_invaders::sim::{Entity, GameEvent, SimulationState};
use grendel_invaders::{Game, Settings};

const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 60 * 60;

/// Chases the lowest living enemy and taps fire every other frame
struct Autopilot {
    keys: KeyboardState,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            keys: KeyboardState::new(),
        }
    }

    /// Fill the key state for the coming frame
    fn steer(&mut self, state: &SimulationState, frame: u32) {
        for key in Key::ALL {
            self.keys.release(key);
        }

        if !state.is_playing() {
            self.keys.press(Key::Confirm);
            return;
        }

        let player_x = state.player.position().x;
        let target = state
            .squad
            .alive()
            .max_by(|a, b| a.position().y.total_cmp(&b.position().y))
            .map(|enemy| {
                let b = enemy.bounds();
                b.x + b.w / 2.0
            });

        if let Some(target_x) = target {
            if target_x < player_x - 4.0 {
                self.keys.press(Key::Left);
            } else if target_x > player_x + 4.0 {
                self.keys.press(Key::Right);
            }
        }

        // Alternate so every other frame is a fresh press
        if frame % 2 == 0 {
            self.keys.press(Key::ShootSpace);
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Grendel Invaders (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut game = Game::new(settings);
    let mut pilot = Autopilot::new();
    let mut surface = DrawList::new();
    let mut sessions = 0u32;
    let mut best_score = 0u64;
    let mut vertices = 0usize;

    for frame in 0..frames {
        pilot.steer(&game.state, frame);
        surface.reset();

        for event in game.frame(FRAME_DT, &pilot.keys, &mut surface) {
            match &event {
                GameEvent::SessionStarted => sessions += 1,
                GameEvent::SessionOver { score, .. } => best_score = best_score.max(*score),
                _ => {}
            }
            log::debug!("frame {}: {:?}", frame, event);
        }

        vertices = vertices.max(shapes::tessellate(&surface).len());
        pilot.keys.latch();
    }

    if game.state.is_playing() {
        best_score = best_score.max(game.state.player.score);
    }

    log::info!(
        "{} frames, {} sessions, best score {}, wave {}, peak {} vertices",
        frames,
        sessions,
        best_score,
        game.state.squad.wave,
        vertices
    );
    if log::log_enabled!(log::Level::Trace) {
        match serde_json::to_string(&game.state.player) {
            Ok(json) => log::trace!("final player state: {}", json),
            Err(err) => log::warn!("could not dump player state: {}", err),
        }
    }
}
