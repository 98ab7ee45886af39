//! Enemy squad controller
//!
//! The squad shares one horizontal direction. When any enemy touches a
//! margin during its step, the reversal (and a one-tick descent) is applied
//! at the start of the *next* update, never the current one.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Entity};
use crate::consts::*;
use crate::renderer::TextMetrics;

/// Squads start out marching left
pub const INITIAL_DIRECTION: f32 = -1.0;

/// Enemy labels, assigned to grid slots in order and wrapped around
pub const WORDS: &[&str] = &[
    "Lo", "we", "have", "heard", "the", "honor", "of", "the", "Speardanes", "nation", "kings", "in",
    "days", "now", "gome", "how", "those", "battle", "lords", "brought", "themselves", "glory",
    "Oft", "Scyld", "Shefing", "shattered", "the", "forces", "of", "kinsman", "marauders",
    "dragged", "away", "their", "meadhall", "benches", "terrified", "earls", "after", "first",
    "men", "found", "him", "castaway", "He", "got", "recompense", "for", "that", "He", "grew",
    "up", "under", "the", "clouds", "won", "glory", "of", "men", "till", "all", "his", "enemies",
    "sitting", "around", "him", "heard", "across", "the", "whaleroads", "his", "demands", "and",
    "gave", "him", "tribute", "That", "was", "a", "good", "king",
];

/// Seconds between steps for a squad of `alive` enemies on `wave`
pub fn step_delay_for(alive: usize, wave: u32) -> f32 {
    let raw = (alive as f32 * 20.0 - wave as f32 * 10.0) / 1000.0;
    raw.max(MIN_STEP_DELAY)
}

/// Canonical spawn point of grid slot `index` (row-major, 11 per row)
pub fn formation_position(index: usize) -> Vec2 {
    let col = (index % SQUAD_COLUMNS) as f32;
    let row = (index / SQUAD_COLUMNS) as f32;
    Vec2::new(
        CANVAS_WIDTH / 2.0 - ALIEN_SQUAD_WIDTH / 2.0 + ALIEN_X_MARGIN / 2.0 + col * ALIEN_X_MARGIN,
        CANVAS_HEIGHT / 3.25 - row * ALIEN_Y_SPACING,
    )
}

/// What happened to the squad during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquadOutcome {
    /// Business as usual
    Advanced,
    /// The last enemy was removed; `wave` is the new wave number
    WaveCleared { wave: u32 },
    /// An enemy stepped past the invasion line
    Invaded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squad {
    pub aliens: Vec<Enemy>,
    /// -1 marching left, +1 marching right
    pub direction: f32,
    /// An edge was touched; reverse and descend next update
    pub pending_reverse: bool,
    /// Non-zero for exactly one update after a reversal
    pub descend_offset: f32,
    pub wave: u32,
    /// Last computed step delay, shared by every enemy
    pub step_delay: f32,
    /// Floor handed to enemy bullets (None keeps them alive below the playfield)
    pub enemy_bullet_floor: Option<f32>,
}

impl Squad {
    /// A full wave-1 formation
    pub fn new(metrics: &dyn TextMetrics) -> Self {
        let mut squad = Self::with_aliens(Vec::new());
        squad.spawn_formation(metrics);
        squad
    }

    /// A squad made of hand-placed enemies
    pub fn with_aliens(aliens: Vec<Enemy>) -> Self {
        let alive = aliens.iter().filter(|a| a.alive).count();
        Self {
            aliens,
            direction: INITIAL_DIRECTION,
            pending_reverse: false,
            descend_offset: 0.0,
            wave: 1,
            step_delay: step_delay_for(alive, 1),
            enemy_bullet_floor: None,
        }
    }

    /// Replace the squad with a fresh 5x11 grid at the canonical layout
    pub fn spawn_formation(&mut self, metrics: &dyn TextMetrics) {
        self.aliens = (0..SQUAD_SIZE)
            .map(|i| {
                let pos = formation_position(i);
                Enemy::new(WORDS[i % WORDS.len()], pos.x, pos.y, metrics)
            })
            .collect();
        self.direction = INITIAL_DIRECTION;
        self.pending_reverse = false;
        self.descend_offset = 0.0;
        self.step_delay = step_delay_for(self.aliens.len(), self.wave);
    }

    /// Back to wave 1 with a fresh formation
    pub fn reset(&mut self, metrics: &dyn TextMetrics) {
        self.wave = 1;
        self.spawn_formation(metrics);
    }

    pub fn alive_count(&self) -> usize {
        self.aliens.iter().filter(|a| a.alive).count()
    }

    pub fn alive(&self) -> impl Iterator<Item = &Enemy> {
        self.aliens.iter().filter(|a| a.alive)
    }

    /// Advance every enemy by `dt`
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        metrics: &dyn TextMetrics,
        rng: &mut R,
    ) -> SquadOutcome {
        if self.pending_reverse {
            self.pending_reverse = false;
            self.direction = -self.direction;
            self.descend_offset = SQUAD_DESCEND;
            log::debug!("Squad reversing, now heading {}", self.direction);
        }

        self.aliens.retain(|a| a.alive);
        if self.aliens.is_empty() {
            self.wave += 1;
            self.spawn_formation(metrics);
            log::info!("Wave cleared, starting wave {}", self.wave);
            return SquadOutcome::WaveCleared { wave: self.wave };
        }

        self.step_delay = step_delay_for(self.aliens.len(), self.wave);

        let mut invaded = false;
        for alien in &mut self.aliens {
            alien.step_delay = self.step_delay;
            alien.update(dt);

            if alien.step_ready() {
                let report = alien.step(self.direction, rng);
                if report.hit_edge {
                    self.pending_reverse = true;
                }
                invaded |= report.invaded;
            }
            alien.descend(self.descend_offset);

            if alien.do_shoot {
                alien.do_shoot = false;
                if !alien.has_live_bullet() {
                    alien.shoot(self.enemy_bullet_floor);
                }
            }
        }
        self.descend_offset = 0.0;

        if invaded {
            log::info!("Squad reached the invasion line on wave {}", self.wave);
            return SquadOutcome::Invaded;
        }
        SquadOutcome::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::GlyphMetrics;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn metrics() -> GlyphMetrics {
        GlyphMetrics::default()
    }

    #[test]
    fn test_step_delay_formula() {
        assert!((step_delay_for(55, 1) - 1.09).abs() < 1e-6);
        assert_eq!(step_delay_for(1, 5), MIN_STEP_DELAY);
        assert_eq!(step_delay_for(0, 1), MIN_STEP_DELAY);
        assert!(step_delay_for(54, 1) < step_delay_for(55, 1));
        assert!(step_delay_for(55, 2) < step_delay_for(55, 1));
    }

    #[test]
    fn test_formation_layout() {
        let squad = Squad::new(&metrics());
        assert_eq!(squad.aliens.len(), SQUAD_SIZE);
        assert_eq!(squad.alive_count(), 55);
        assert_eq!(squad.wave, 1);
        assert_eq!(squad.direction, INITIAL_DIRECTION);

        assert_eq!(squad.aliens[0].position(), Vec2::new(120.0, 640.0 / 3.25));
        assert_eq!(squad.aliens[10].position().x, 520.0);
        assert_eq!(squad.aliens[11].position(), Vec2::new(120.0, 640.0 / 3.25 - 40.0));
        assert_eq!(squad.aliens[0].word, "Lo");
        assert_eq!(squad.aliens[9].word, "nation");
    }

    #[test]
    fn test_wave_progression() {
        let m = metrics();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut squad = Squad::new(&m);
        squad.direction = 1.0;
        for alien in &mut squad.aliens {
            alien.alive = false;
        }
        assert_eq!(squad.alive_count(), 0);

        let outcome = squad.update(0.016, &m, &mut rng);
        assert_eq!(outcome, SquadOutcome::WaveCleared { wave: 2 });
        assert_eq!(squad.wave, 2);
        assert_eq!(squad.aliens.len(), 55);
        assert_eq!(squad.direction, INITIAL_DIRECTION);
        for (i, alien) in squad.aliens.iter().enumerate() {
            assert_eq!(alien.position(), formation_position(i));
            assert!(alien.alive);
        }
    }

    #[test]
    fn test_dead_enemies_pruned_before_update() {
        let m = metrics();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut squad = Squad::new(&m);
        squad.aliens[3].alive = false;
        squad.aliens[40].alive = false;

        let outcome = squad.update(0.016, &m, &mut rng);
        assert_eq!(outcome, SquadOutcome::Advanced);
        assert_eq!(squad.aliens.len(), 53);
        assert!((squad.step_delay - 1.05).abs() < 1e-6);
        assert!(squad.aliens.iter().all(|a| a.step_delay == squad.step_delay));
    }

    #[test]
    fn test_reversal_lags_one_tick_and_descends_once() {
        let m = metrics();
        let mut rng = Pcg32::seed_from_u64(3);
        let enemy = Enemy::new("Lo", 25.0, 100.0, &m);
        let mut squad = Squad::with_aliens(vec![enemy]);

        // Tick 1: the step touches the left margin, direction unchanged
        squad.aliens[0].step_accumulator = 10.0;
        squad.update(0.0, &m, &mut rng);
        assert!(squad.pending_reverse);
        assert_eq!(squad.direction, -1.0);
        assert_eq!(squad.aliens[0].position(), Vec2::new(15.0, 100.0));

        // Tick 2: reversal applied, descent applied once
        squad.update(0.0, &m, &mut rng);
        assert!(!squad.pending_reverse);
        assert_eq!(squad.direction, 1.0);
        assert_eq!(squad.aliens[0].position().y, 125.0);

        // Tick 3: no further descent
        squad.update(0.0, &m, &mut rng);
        assert_eq!(squad.aliens[0].position().y, 125.0);
        assert_eq!(squad.descend_offset, 0.0);
    }

    #[test]
    fn test_enemies_wait_for_step_delay() {
        let m = metrics();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut squad = Squad::new(&m);
        let start = squad.aliens[0].position();

        squad.update(0.5, &m, &mut rng);
        assert_eq!(squad.aliens[0].position(), start);

        squad.update(0.6, &m, &mut rng);
        assert_eq!(squad.aliens[0].position(), start - Vec2::new(SQUAD_STEP_X, 0.0));
    }

    #[test]
    fn test_invasion() {
        let m = metrics();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemy = Enemy::new("Lo", 300.0, INVASION_LINE + 5.0, &m);
        enemy.step_accumulator = 10.0;
        let mut squad = Squad::with_aliens(vec![enemy]);
        assert_eq!(squad.update(0.0, &m, &mut rng), SquadOutcome::Invaded);

        squad.wave = 4;
        squad.reset(&m);
        assert_eq!(squad.wave, 1);
        assert_eq!(squad.aliens.len(), SQUAD_SIZE);
    }

    #[test]
    fn test_live_bullet_is_not_replaced() {
        let m = metrics();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::new("Lo", 300.0, 200.0, &m);
        enemy.shoot(None);
        if let Some(bullet) = enemy.bullet.as_mut() {
            bullet.sprite.position.y = 400.0;
            bullet.sprite.update_bounds();
        }
        enemy.do_shoot = true;
        let mut squad = Squad::with_aliens(vec![enemy]);

        squad.update(0.0, &m, &mut rng);
        let alien = &squad.aliens[0];
        assert!(!alien.do_shoot);
        assert!(alien.has_live_bullet());
        assert_eq!(alien.bullet.as_ref().map(|b| b.position().y), Some(400.0));

        // Once the bullet is gone the pending shot fires from the enemy
        squad.aliens[0].bullet = None;
        squad.aliens[0].do_shoot = true;
        squad.update(0.0, &m, &mut rng);
        let y = squad.aliens[0].bullet.as_ref().map(|b| b.position().y);
        assert!(y.is_some_and(|y| y < 400.0));
    }

    #[test]
    fn test_enemies_fire_and_bullets_despawn_at_floor() {
        let m = metrics();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut squad = Squad::new(&m);
        squad.enemy_bullet_floor = Some(CANVAS_HEIGHT);

        let mut fired = false;
        for _ in 0..2000 {
            squad.update(0.05, &m, &mut rng);
            fired |= squad.aliens.iter().any(|a| a.bullet.is_some());
            if squad.pending_reverse {
                // keep the formation from marching off the bottom
                squad.aliens.iter_mut().for_each(|a| a.sprite.position.y = 100.0);
            }
            for alien in &squad.aliens {
                if let Some(bullet) = &alien.bullet {
                    assert!(!bullet.alive || bullet.position().y <= CANVAS_HEIGHT);
                }
            }
        }
        assert!(fired);
    }
}
