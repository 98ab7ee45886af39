//! Game entities: the player ship, bullets and word enemies
//!
//! Each entity embeds a [`Sprite`] for its position and box and implements
//! [`Entity`]. Bounds are refreshed on construction, after every update and
//! before every draw, so collision never reads a stale box.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::sprite::{Anchor, Sprite};
use crate::consts::*;
use crate::platform::{InputSource, Key};
use crate::renderer::{Color, ImageId, Surface, TextMetrics, colors};

/// Per-frame behavior shared by everything on the playfield
pub trait Entity {
    /// Advance internal state by `dt` seconds
    fn update(&mut self, dt: f32);
    /// Issue draw calls; refreshes bounds first
    fn draw(&mut self, surface: &mut dyn Surface);
    fn bounds(&self) -> Rect;
}

/// Vertical travel direction of a bullet (+1 flies up, -1 flies down)
pub const UP: f32 = 1.0;
pub const DOWN: f32 = -1.0;

/// A projectile, owned by whoever fired it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub sprite: Sprite,
    pub direction: f32,
    pub speed: f32,
    pub alive: bool,
    /// Kill the bullet once it passes below this y (None = only the top edge)
    pub despawn_below: Option<f32>,
}

impl Bullet {
    pub fn new(x: f32, y: f32, direction: f32, speed: f32) -> Self {
        Self {
            sprite: Sprite::new(
                Vec2::new(x, y),
                Vec2::new(BULLET_W, BULLET_H),
                Anchor::Center,
            ),
            direction,
            speed,
            alive: true,
            despawn_below: None,
        }
    }

    pub fn with_floor(mut self, floor: Option<f32>) -> Self {
        self.despawn_below = floor;
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }
}

impl Entity for Bullet {
    fn update(&mut self, dt: f32) {
        self.sprite.position.y -= self.speed * self.direction * dt;

        if self.sprite.position.y < 0.0 {
            self.alive = false;
        }
        let y = self.sprite.position.y;
        if self.despawn_below.is_some_and(|floor| y > floor) {
            self.alive = false;
        }
        self.sprite.update_bounds();
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        self.sprite.update_bounds();
        surface.draw_image(ImageId::Bullet, self.sprite.bounds);
    }

    fn bounds(&self) -> Rect {
        self.sprite.bounds
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub sprite: Sprite,
    pub lives: u32,
    pub score: u64,
    pub x_vel: f32,
    /// Live and freshly-dead shots; dead ones are pruned on the next update
    pub bullets: Vec<Bullet>,
    /// Seconds since the last shot
    pub shot_cooldown: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            sprite: Sprite::new(
                Self::spawn_point(),
                Vec2::new(PLAYER_CLIP_W, PLAYER_CLIP_H),
                Anchor::Center,
            )
            .with_scale(Vec2::splat(PLAYER_SCALE)),
            lives: PLAYER_LIVES,
            score: 0,
            x_vel: 0.0,
            bullets: Vec::new(),
            shot_cooldown: 0.0,
        }
    }

    /// Bottom-center spawn point
    pub fn spawn_point() -> Vec2 {
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT - PLAYER_BOTTOM_OFFSET)
    }

    /// Start-of-session values: full lives, no score, centered
    pub fn reset(&mut self) {
        self.lives = PLAYER_LIVES;
        self.score = 0;
        self.recenter();
    }

    pub fn recenter(&mut self) {
        self.sprite.position = Self::spawn_point();
        self.sprite.update_bounds();
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }

    /// Fire a shot from the ship's nose
    pub fn shoot(&mut self) {
        let pos = self.sprite.position;
        let bullet = Bullet::new(
            pos.x,
            pos.y - self.sprite.bounds.h / 2.0,
            UP,
            PLAYER_BULLET_SPEED,
        );
        self.bullets.push(bullet);
    }

    /// Apply the key snapshot. Returns true when a shot was fired.
    pub fn handle_input(&mut self, input: &dyn InputSource) -> bool {
        self.x_vel = if input.is_down(Key::Left) {
            -PLAYER_SPEED
        } else if input.is_down(Key::Right) {
            PLAYER_SPEED
        } else {
            0.0
        };

        let trigger = Key::SHOOT.iter().any(|k| input.was_just_pressed(*k));
        if trigger && self.shot_cooldown >= SHOT_COOLDOWN {
            self.shoot();
            self.shot_cooldown = 0.0;
            return true;
        }
        false
    }

    /// Drop dead shots, then advance the rest
    fn update_bullets(&mut self, dt: f32) {
        self.bullets.retain(|b| b.alive);
        for bullet in &mut self.bullets {
            bullet.update(dt);
        }
    }

    pub fn live_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.alive)
    }
}

impl Entity for Player {
    fn update(&mut self, dt: f32) {
        self.shot_cooldown += dt;

        self.sprite.position.x += self.x_vel * dt;

        let half_w = self.sprite.bounds.w / 2.0;
        self.sprite.position.x = self
            .sprite
            .position
            .x
            .clamp(half_w, CANVAS_WIDTH - half_w);
        self.sprite.update_bounds();

        self.update_bullets(dt);
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        self.sprite.update_bounds();
        surface.draw_image(ImageId::Player, self.sprite.bounds);

        for bullet in self.bullets.iter_mut().filter(|b| b.alive) {
            bullet.draw(surface);
        }
    }

    fn bounds(&self) -> Rect {
        self.sprite.bounds
    }
}

/// What an enemy noticed while taking a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Reached the playfield margin in the direction of travel
    pub hit_edge: bool,
    /// Crossed the invasion line
    pub invaded: bool,
}

/// Chance per step that an enemy decides to fire
#[inline]
pub fn shot_probability(step_delay: f32) -> f32 {
    (5.0 * (step_delay + 1.0) / 1000.0).clamp(0.0, 1.0)
}

/// One member of the squad, drawn as a word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub sprite: Sprite,
    pub word: String,
    pub font_size: f32,
    pub color: Color,
    pub alive: bool,
    /// Seconds between horizontal steps
    pub step_delay: f32,
    pub step_accumulator: f32,
    pub do_shoot: bool,
    pub bullet: Option<Bullet>,
}

impl Enemy {
    pub fn new(word: &str, x: f32, y: f32, metrics: &dyn TextMetrics) -> Self {
        let size = Vec2::new(
            metrics.measure_text(word, ALIEN_FONT_SIZE),
            metrics.line_height(ALIEN_FONT_SIZE),
        );
        Self {
            sprite: Sprite::new(Vec2::new(x, y), size, Anchor::Origin),
            word: word.to_string(),
            font_size: ALIEN_FONT_SIZE,
            color: colors::WHITE,
            alive: true,
            step_delay: 1.0,
            step_accumulator: 0.0,
            do_shoot: false,
            bullet: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }

    pub fn has_live_bullet(&self) -> bool {
        self.bullet.as_ref().is_some_and(|b| b.alive)
    }

    /// Drop a bullet from below the word
    pub fn shoot(&mut self, despawn_below: Option<f32>) {
        let pos = self.sprite.position;
        self.bullet = Some(
            Bullet::new(
                pos.x,
                pos.y + self.sprite.bounds.w / 2.0,
                DOWN,
                ENEMY_BULLET_SPEED,
            )
            .with_floor(despawn_below),
        );
    }

    pub fn step_ready(&self) -> bool {
        self.step_accumulator >= self.step_delay
    }

    /// Take one horizontal step in `direction`, maybe deciding to shoot
    pub fn step<R: Rng>(&mut self, direction: f32, rng: &mut R) -> StepReport {
        let x = self.sprite.position.x;
        let half_w = self.sprite.bounds.w / 2.0;

        let hit_left = direction < 0.0 && x < half_w + SQUAD_EDGE_MARGIN;
        let hit_right = direction > 0.0 && x > CANVAS_WIDTH - half_w - SQUAD_EDGE_MARGIN;
        let report = StepReport {
            hit_edge: hit_left || hit_right,
            invaded: self.sprite.position.y > INVASION_LINE,
        };

        if rng.random_bool(shot_probability(self.step_delay) as f64) {
            self.do_shoot = true;
        }

        self.sprite.position.x += SQUAD_STEP_X * direction;
        self.step_accumulator = 0.0;
        self.sprite.update_bounds();

        report
    }

    /// Shift down by the squad's descent for this tick
    pub fn descend(&mut self, offset: f32) {
        if offset != 0.0 {
            self.sprite.position.y += offset;
            self.sprite.update_bounds();
        }
    }
}

impl Entity for Enemy {
    fn update(&mut self, dt: f32) {
        self.step_accumulator += dt;

        match self.bullet.as_mut() {
            Some(bullet) if bullet.alive => bullet.update(dt),
            _ => self.bullet = None,
        }
        self.sprite.update_bounds();
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        self.sprite.update_bounds();
        // A shot-down enemy lingers until the next prune; only its bullet shows
        if self.alive {
            let pos = self.sprite.position;
            surface.fill_text(&self.word, pos.x, pos.y, self.font_size, self.color);
        }

        if let Some(bullet) = self.bullet.as_mut().filter(|b| b.alive) {
            bullet.draw(surface);
        }
    }

    fn bounds(&self) -> Rect {
        self.sprite.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyboardState;
    use crate::renderer::{DrawList, GlyphMetrics};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_bullet_dies_above_top() {
        let mut bullet = Bullet::new(100.0, 5.0, UP, 1000.0);
        bullet.update(0.001);
        assert!(bullet.alive);
        bullet.update(0.01);
        assert!(!bullet.alive);
    }

    #[test]
    fn test_downward_bullet_without_floor_never_despawns() {
        let mut bullet = Bullet::new(100.0, 600.0, DOWN, 500.0);
        for _ in 0..100 {
            bullet.update(0.1);
        }
        assert!(bullet.alive);
        assert!(bullet.position().y > CANVAS_HEIGHT);
    }

    #[test]
    fn test_downward_bullet_with_floor_despawns() {
        let mut bullet = Bullet::new(100.0, 600.0, DOWN, 500.0).with_floor(Some(CANVAS_HEIGHT));
        bullet.update(0.1);
        assert!(!bullet.alive);
    }

    #[test]
    fn test_player_velocity_left_wins() {
        let mut player = Player::new();
        let mut keys = KeyboardState::new();
        keys.press(Key::Left);
        keys.press(Key::Right);
        player.handle_input(&keys);
        assert_eq!(player.x_vel, -PLAYER_SPEED);

        keys.release(Key::Left);
        player.handle_input(&keys);
        assert_eq!(player.x_vel, PLAYER_SPEED);

        keys.release(Key::Right);
        player.handle_input(&keys);
        assert_eq!(player.x_vel, 0.0);
    }

    #[test]
    fn test_shot_cooldown_gate() {
        let mut player = Player::new();
        let mut keys = KeyboardState::new();

        // Cooldown starts empty: no shot in the first half second
        keys.press(Key::ShootSpace);
        assert!(!player.handle_input(&keys));
        keys.release(Key::ShootSpace);
        keys.latch();

        player.update(0.6);
        keys.press(Key::ShootX);
        assert!(player.handle_input(&keys));
        assert_eq!(player.bullets.len(), 1);
        keys.release(Key::ShootX);
        keys.latch();

        // Second press 0.2s later is swallowed
        player.update(0.2);
        keys.press(Key::ShootUp);
        assert!(!player.handle_input(&keys));
        assert_eq!(player.bullets.len(), 1);
        keys.release(Key::ShootUp);
        keys.latch();

        // Once 0.5s have passed since the shot, fire again
        player.update(0.35);
        keys.press(Key::ShootUp);
        assert!(player.handle_input(&keys));
        assert_eq!(player.bullets.len(), 2);
    }

    #[test]
    fn test_shot_allowed_at_exact_cooldown() {
        let mut player = Player::new();
        let mut keys = KeyboardState::new();

        player.update(0.25);
        keys.press(Key::ShootSpace);
        assert!(!player.handle_input(&keys));
        keys.release(Key::ShootSpace);
        keys.latch();

        // 0.25 + 0.25 is exactly SHOT_COOLDOWN in f32
        player.update(0.25);
        assert_eq!(player.shot_cooldown, SHOT_COOLDOWN);
        keys.press(Key::ShootSpace);
        assert!(player.handle_input(&keys));
        assert_eq!(player.bullets.len(), 1);
    }

    #[test]
    fn test_held_shoot_key_fires_once() {
        let mut player = Player::new();
        player.shot_cooldown = 10.0;
        let mut keys = KeyboardState::new();
        keys.press(Key::ShootSpace);
        assert!(player.handle_input(&keys));
        keys.latch();

        player.update(1.0);
        assert!(!player.handle_input(&keys));
        assert_eq!(player.bullets.len(), 1);
    }

    #[test]
    fn test_player_clamped_to_playfield() {
        let mut player = Player::new();
        player.x_vel = -PLAYER_SPEED;
        for _ in 0..100 {
            player.update(0.1);
        }
        assert_eq!(player.position().x, player.bounds().w / 2.0);

        player.x_vel = PLAYER_SPEED;
        for _ in 0..100 {
            player.update(0.1);
        }
        assert_eq!(player.position().x, CANVAS_WIDTH - player.bounds().w / 2.0);
    }

    #[test]
    fn test_player_prunes_dead_bullets_without_skipping() {
        let mut player = Player::new();
        for i in 0..6 {
            player.shoot();
            player.bullets[i].alive = i % 2 == 0;
        }
        let before: Vec<f32> = player.bullets.iter().map(|b| b.position().y).collect();
        player.update(0.01);

        assert_eq!(player.bullets.len(), 3);
        // Every survivor advanced exactly once
        for bullet in &player.bullets {
            assert!((bullet.position().y - (before[0] - 10.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_player_reset() {
        let mut player = Player::new();
        player.lives = 0;
        player.score = 500;
        player.sprite.position.x = 12.0;
        player.reset();
        assert_eq!(player.lives, PLAYER_LIVES);
        assert_eq!(player.score, 0);
        assert_eq!(player.position(), Player::spawn_point());
    }

    #[test]
    fn test_enemy_bounds_from_metrics() {
        let metrics = GlyphMetrics::default();
        let enemy = Enemy::new("heard", 100.0, 100.0, &metrics);
        assert_eq!(enemy.bounds(), Rect::new(100.0, 100.0, 36.0, 12.0));
    }

    #[test]
    fn test_enemy_step_moves_and_resets_timer() {
        let metrics = GlyphMetrics::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::new("Lo", 300.0, 200.0, &metrics);
        enemy.step_delay = 0.5;

        enemy.update(0.3);
        assert!(!enemy.step_ready());
        enemy.update(0.3);
        assert!(enemy.step_ready());

        let report = enemy.step(-1.0, &mut rng);
        assert_eq!(report, StepReport::default());
        assert_eq!(enemy.position().x, 290.0);
        assert_eq!(enemy.step_accumulator, 0.0);
    }

    #[test]
    fn test_enemy_edge_detection() {
        let metrics = GlyphMetrics::default();
        let mut rng = Pcg32::seed_from_u64(7);

        let mut left = Enemy::new("Lo", 20.0, 200.0, &metrics);
        assert!(left.step(-1.0, &mut rng).hit_edge);
        let mut left = Enemy::new("Lo", 20.0, 200.0, &metrics);
        assert!(!left.step(1.0, &mut rng).hit_edge);

        let mut right = Enemy::new("Lo", 620.0, 200.0, &metrics);
        assert!(right.step(1.0, &mut rng).hit_edge);
    }

    #[test]
    fn test_enemy_invasion_report() {
        let metrics = GlyphMetrics::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = Enemy::new("Lo", 300.0, INVASION_LINE + 1.0, &metrics);
        assert!(enemy.step(1.0, &mut rng).invaded);
    }

    #[test]
    fn test_shot_probability() {
        assert!((shot_probability(1.09) - 0.01045).abs() < 1e-6);
        assert!((shot_probability(0.05) - 0.00525).abs() < 1e-6);
        assert_eq!(shot_probability(1000.0), 1.0);
    }

    #[test]
    fn test_enemy_drops_dead_bullet() {
        let metrics = GlyphMetrics::default();
        let mut enemy = Enemy::new("Lo", 300.0, 200.0, &metrics);
        enemy.shoot(None);
        assert!(enemy.has_live_bullet());
        let start_y = enemy.bullet.as_ref().map(|b| b.position().y);
        enemy.update(0.1);
        assert!(enemy.bullet.as_ref().map(|b| b.position().y) > start_y);

        if let Some(b) = enemy.bullet.as_mut() {
            b.alive = false;
        }
        enemy.update(0.1);
        assert!(enemy.bullet.is_none());
    }

    #[test]
    fn test_draw_refreshes_bounds() {
        let metrics = GlyphMetrics::default();
        let mut surface = DrawList::new();
        let mut enemy = Enemy::new("Lo", 300.0, 200.0, &metrics);
        enemy.sprite.position.x = 10.0;
        enemy.draw(&mut surface);
        assert_eq!(enemy.bounds().x, 10.0);
        assert!(surface.contains_text("Lo"));
    }
}
