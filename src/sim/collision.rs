//! Collision detection and combat response
//!
//! Runs once per tick after every entity has moved. Player bullets are
//! tested against enemies first, then enemy bullets against the player.

use rand::Rng;

use super::entity::Entity;
use super::particles::ExplosionSpec;
use super::state::{GameEvent, SimulationState};
use crate::consts::*;

/// How the player fared against enemy fire this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStrike {
    Unharmed,
    /// Lost a life; `lives` remain
    Hit { lives: u32 },
    /// Struck with no lives left
    Fatal,
}

/// Result of one collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatOutcome {
    pub enemies_destroyed: u32,
    pub player: PlayerStrike,
}

/// Resolve every bullet hit for this tick
///
/// A fatal strike moves the state back to the start screen but leaves the
/// striking bullet alive.
pub fn resolve_collisions<R: Rng>(state: &mut SimulationState, rng: &mut R) -> CombatOutcome {
    let enemies_destroyed = resolve_player_shots(state, rng);
    let player = resolve_enemy_shots(state, rng);

    if player == PlayerStrike::Fatal {
        state.end_session();
    }

    CombatOutcome {
        enemies_destroyed,
        player,
    }
}

/// Each live player bullet destroys at most one live enemy
fn resolve_player_shots<R: Rng>(state: &mut SimulationState, rng: &mut R) -> u32 {
    let SimulationState {
        player,
        squad,
        particles,
        events,
        ..
    } = state;

    let mut destroyed = 0;
    for bullet in player.bullets.iter_mut().filter(|b| b.alive) {
        let bullet_box = bullet.bounds();
        for alien in squad.aliens.iter_mut().filter(|a| a.alive) {
            if !bullet_box.overlaps(&alien.bounds()) {
                continue;
            }

            alien.alive = false;
            bullet.alive = false;
            let pos = alien.position();
            particles.create_explosion(pos.x, pos.y, &ExplosionSpec::ENEMY_HIT, rng);
            player.score += ENEMY_SCORE;
            destroyed += 1;

            log::debug!("Shot down \"{}\", score {}", alien.word, player.score);
            events.push(GameEvent::EnemyDestroyed {
                word: alien.word.clone(),
                score: player.score,
            });
            break;
        }
    }
    destroyed
}

/// The first enemy bullet touching the player decides the outcome
fn resolve_enemy_shots<R: Rng>(state: &mut SimulationState, rng: &mut R) -> PlayerStrike {
    let SimulationState {
        player,
        squad,
        particles,
        events,
        ..
    } = state;

    let player_box = player.bounds();
    // Bullets of enemies shot down this tick still count
    for alien in squad.aliens.iter_mut() {
        let Some(bullet) = alien.bullet.as_mut() else {
            continue;
        };
        if !bullet.alive || !bullet.bounds().overlaps(&player_box) {
            continue;
        }

        if player.lives == 0 {
            return PlayerStrike::Fatal;
        }

        bullet.alive = false;
        let pos = player.position();
        particles.create_explosion(pos.x, pos.y, &ExplosionSpec::PLAYER_HIT, rng);
        player.recenter();
        player.lives -= 1;

        log::debug!("Player hit, {} lives left", player.lives);
        events.push(GameEvent::PlayerHit {
            lives: player.lives,
        });
        return PlayerStrike::Hit {
            lives: player.lives,
        };
    }
    PlayerStrike::Unharmed
}
