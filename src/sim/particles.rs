//! Explosion particles backed by a free-list arena
//!
//! Particle storage lives in `slots`. `live` lists the slots currently on
//! screen (in spawn order) and `free` lists slots parked for reuse, capped
//! at [`PARTICLE_POOL_CAPACITY`]. Slots that expire while the free list is
//! full are released from the arena entirely.
//!
//! Particles integrate once per draw, not per second: simulation and
//! rendering are fused here.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::PARTICLE_POOL_CAPACITY;
use crate::renderer::{Color, Surface, colors, with_alpha};

/// A single decaying point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    /// Per-frame velocity
    pub x_units: f32,
    pub y_units: f32,
    pub life: i32,
    pub max_life: i32,
    pub gravity: f32,
    pub color: Color,
    pub width: f32,
    pub height: f32,
    pub moves: u32,
}

impl Particle {
    /// Opacity derived from remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    /// Advance one frame. Returns false once expired.
    fn advance(&mut self) -> bool {
        self.moves += 1;
        self.x += self.x_units;
        self.y += self.y_units + self.gravity * self.moves as f32;
        self.life -= 1;
        self.life > 0
    }
}

/// Parameters of one burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionSpec {
    pub color: Color,
    pub count: usize,
    pub width: f32,
    pub height: f32,
    /// Upper speed scale; actual speeds fall in [max/2, max*1.5)
    pub speed_max: f32,
    pub gravity: f32,
    /// Base life in frames; actual lives fall in [base/2, base*1.5)
    pub life_base: f32,
}

impl ExplosionSpec {
    /// Burst left behind by a destroyed enemy
    pub const ENEMY_HIT: Self = Self {
        color: colors::WHITE,
        count: 70,
        width: 5.0,
        height: 5.0,
        speed_max: 3.0,
        gravity: 0.15,
        life_base: 50.0,
    };

    /// Burst when the player is struck
    pub const PLAYER_HIT: Self = Self {
        color: colors::GREEN,
        count: 100,
        width: 8.0,
        height: 8.0,
        speed_max: 6.0,
        gravity: 0.001,
        life_base: 40.0,
    };
}

/// Where a slot index is referenced from
#[derive(Debug, Clone, Copy)]
enum SlotRef {
    Live(usize),
    Free(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleExplosion {
    slots: Vec<Particle>,
    live: Vec<usize>,
    free: Vec<usize>,
    /// Disabled explosions spawn nothing
    pub enabled: bool,
}

impl Default for ParticleExplosion {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform sample from `[low, high)`, collapsing to `low` for empty ranges
fn sample<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

impl ParticleExplosion {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            live: Vec::new(),
            free: Vec::with_capacity(PARTICLE_POOL_CAPACITY),
            enabled: true,
        }
    }

    /// Particles currently on screen
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Expired particles parked for reuse
    pub fn pooled_count(&self) -> usize {
        self.free.len()
    }

    /// Total particle storage held by the arena
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.live.iter().map(|&i| &self.slots[i])
    }

    /// Spawn a burst of `spec.count` particles at (x, y)
    pub fn create_explosion<R: Rng>(&mut self, x: f32, y: f32, spec: &ExplosionSpec, rng: &mut R) {
        if !self.enabled {
            return;
        }

        for _ in 0..spec.count {
            let angle = sample(rng, 0.0, 360.0).to_radians();
            let speed = sample(rng, spec.speed_max / 2.0, spec.speed_max * 1.5);
            let life = sample(rng, spec.life_base / 2.0, spec.life_base * 1.5).floor() as i32;

            let particle = Particle {
                x,
                y,
                x_units: angle.cos() * speed,
                y_units: angle.sin() * speed,
                life,
                max_life: life,
                gravity: spec.gravity,
                color: spec.color,
                width: spec.width,
                height: spec.height,
                moves: 0,
            };

            let slot = match self.free.pop() {
                Some(slot) => {
                    self.slots[slot] = particle;
                    slot
                }
                None => {
                    self.slots.push(particle);
                    self.slots.len() - 1
                }
            };
            self.live.push(slot);
        }
    }

    /// Advance every particle one frame and draw the survivors
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let slots = &mut self.slots;
        let free = &mut self.free;
        let mut released = Vec::new();

        self.live.retain(|&slot| {
            let particle = &mut slots[slot];
            if particle.advance() {
                let rect = Rect::new(particle.x, particle.y, particle.width, particle.height);
                surface.fill_rect(rect, with_alpha(particle.color, particle.alpha()));
                true
            } else {
                if free.len() < PARTICLE_POOL_CAPACITY {
                    free.push(slot);
                } else {
                    released.push(slot);
                }
                false
            }
        });

        if !released.is_empty() {
            self.release(released);
        }
    }

    /// Remove expired slots from the arena, patching indices of moved slots
    fn release(&mut self, mut released: Vec<usize>) {
        released.sort_unstable_by(|a, b| b.cmp(a));

        // Reverse index: slot -> its entry in `live` or `free`
        let mut owner = vec![None; self.slots.len()];
        for (i, &slot) in self.live.iter().enumerate() {
            owner[slot] = Some(SlotRef::Live(i));
        }
        for (i, &slot) in self.free.iter().enumerate() {
            owner[slot] = Some(SlotRef::Free(i));
        }

        // Descending order: the tail slot is never one still waiting for release
        for slot in released {
            let last = self.slots.len() - 1;
            let moved = owner[last];
            self.slots.swap_remove(slot);
            owner.swap_remove(slot);
            if slot == last {
                continue;
            }
            match moved {
                Some(SlotRef::Live(i)) => self.live[i] = slot,
                Some(SlotRef::Free(i)) => self.free[i] = slot,
                None => {}
            }
        }
    }

    /// Drop every particle, keeping nothing pooled
    pub fn clear(&mut self) {
        self.slots.clear();
        self.live.clear();
        self.free.clear();
    }
}
