use rand::Rng;

use crate::config::Config;
use crate::entities::{ENEMY_HEIGHT, Enemy};

/// Emits one enemy at the right edge every `spawn_interval + 1` ticks
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    counter: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Advances the counter by one tick and returns a new enemy once it passes the interval
    pub fn tick<R: Rng>(&mut self, config: &Config, rng: &mut R) -> Option<Enemy> {
        self.counter += 1;
        if self.counter <= config.spawn_interval {
            return None;
        }
        self.counter = 0;

        let max_y = (config.screen_height - ENEMY_HEIGHT).max(0.0);
        let y = rng.random::<f32>() * max_y;
        Some(Enemy::new(config.screen_width, y, config.enemy_speed))
    }
}
