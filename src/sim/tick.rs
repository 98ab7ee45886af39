//! Per-frame simulation step
//!
//! `tick` advances the world by a variable `dt`, `draw` renders the result.
//! Both are driven by [`crate::Game`] once per animation frame.

use rand::Rng;

use super::collision::{CombatOutcome, PlayerStrike, resolve_collisions};
use super::entity::Entity;
use super::squad::SquadOutcome;
use super::state::{GameEvent, GamePhase, SimulationState};
use crate::hud;
use crate::platform::InputSource;
use crate::renderer::{Surface, colors};

/// Advance the game state by `dt` seconds
///
/// Order: player input, player, squad, collisions. Does nothing outside a
/// running session.
pub fn tick<R: Rng>(state: &mut SimulationState, input: &dyn InputSource, dt: f32, rng: &mut R) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.player.handle_input(input);
    state.player.update(dt);

    match state.squad.update(dt, &state.glyphs, rng) {
        SquadOutcome::Advanced => {}
        SquadOutcome::WaveCleared { wave } => {
            state.push_event(GameEvent::WaveCleared { wave });
        }
        SquadOutcome::Invaded => {
            // Fresh formation; nothing left to collide with this frame
            state.reset_session();
            return;
        }
    }

    let CombatOutcome {
        enemies_destroyed,
        player,
    } = resolve_collisions(state, rng);
    if enemies_destroyed > 1 {
        log::debug!("{} enemies destroyed in one frame", enemies_destroyed);
    }
    if player == PlayerStrike::Fatal {
        log::debug!("Fatal hit at t={:.2}", state.time);
    }
}

/// Render the current frame
///
/// During play: player, enemies, particles, HUD. Otherwise the start screen.
pub fn draw(state: &mut SimulationState, surface: &mut dyn Surface, blink_period: f32) {
    surface.clear(colors::BACKGROUND);

    match state.phase {
        GamePhase::Playing => {
            state.player.draw(surface);
            for alien in &mut state.squad.aliens {
                alien.draw(surface);
            }
            state.particles.draw(surface);
            hud::draw_bottom_hud(surface, &state.player);
        }
        GamePhase::Attract => hud::draw_start_screen(surface, state.time, blink_period),
    }
}
