//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Randomness only through an injected, seeded RNG
//! - Stable iteration order (squad grid order, bullet spawn order)
//! - Rendering only through the `Surface` trait

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod particles;
pub mod sprite;
pub mod squad;
pub mod state;
pub mod tick;

pub use collision::{CombatOutcome, PlayerStrike, resolve_collisions};
pub use entity::{Bullet, DOWN, Enemy, Entity, Player, UP};
pub use geometry::Rect;
pub use particles::{ExplosionSpec, Particle, ParticleExplosion};
pub use sprite::{Anchor, Sprite};
pub use squad::{Squad, SquadOutcome};
pub use state::{GameEvent, GamePhase, SimulationState};
pub use tick::{draw, tick};
