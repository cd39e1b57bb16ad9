use std::time::{Duration, Instant};

use super::bounds::Bounds;
use super::bullet::{BULLET_HEIGHT, Bullet};

pub const PLAYER_START_X: f32 = 50.0;
pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Shots in flight, oldest first
    pub bullets: Vec<Bullet>,
    pub lives: u32,
    pub last_shot: Option<Instant>,
}

impl Player {
    /// Creates a player vertically centered on a screen of the given height
    pub fn new(screen_height: f32, speed: f32, lives: u32) -> Self {
        Self {
            x: PLAYER_START_X,
            y: screen_height / 2.0 - PLAYER_HEIGHT / 2.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed,
            bullets: Vec::new(),
            lives,
            last_shot: None,
        }
    }

    pub fn move_up(&mut self, min_y: f32) {
        self.y = (self.y - self.speed).max(min_y);
    }

    pub fn move_down(&mut self, max_y: f32) {
        self.y = (self.y + self.speed).min(max_y);
    }

    pub fn can_fire(&self, now: Instant, cooldown: Duration) -> bool {
        self.last_shot
            .is_none_or(|last| now.saturating_duration_since(last) >= cooldown)
    }

    /// Where a new bullet leaves the ship
    pub fn muzzle(&self) -> (f32, f32) {
        (
            self.x + self.width,
            self.y + self.height / 2.0 - BULLET_HEIGHT / 2.0,
        )
    }

    /// Fires one bullet if the cooldown allows. Returns true if a shot was fired.
    pub fn try_fire(&mut self, now: Instant, cooldown: Duration, bullet_speed: f32) -> bool {
        if !self.can_fire(now, cooldown) {
            return false;
        }

        let (x, y) = self.muzzle();
        self.bullets.push(Bullet::new(x, y, bullet_speed));
        self.last_shot = Some(now);
        true
    }

    /// Advances every bullet and drops the ones past the right edge
    pub fn update_bullets(&mut self, screen_width: f32) {
        for bullet in &mut self.bullets {
            bullet.update();
        }
        self.bullets.retain(|b| !b.is_out_of_bounds(screen_width));
    }

    /// Removes one life and returns how many are left
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec![" |\\  ", "=[#>>", " |/  "]
    }
}
