use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::entities::{ENEMY_HEIGHT, PLAYER_HEIGHT, PLAYER_START_X, PLAYER_WIDTH};

/// Tunable game constants. Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playfield size in world units
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_speed: f32,
    pub starting_lives: u32,
    /// Minimum wall-clock time between shots
    pub fire_cooldown_ms: u64,
    pub bullet_speed: f32,
    pub enemy_speed: f32,
    /// Ticks between enemy spawns
    pub spawn_interval: u32,
    pub explosion_frames: u32,
    pub kill_score: u32,
    /// Background scroll per tick
    pub scroll_step: f32,
    pub frame_ms: u64,
    pub sound_dir: PathBuf,
    pub muted: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 400.0,
            player_speed: 4.0,
            starting_lives: 3,
            fire_cooldown_ms: 400,
            bullet_speed: 7.0,
            enemy_speed: 2.5,
            spawn_interval: 80,
            explosion_frames: 20,
            kill_score: 10,
            scroll_step: 2.0,
            frame_ms: 16,
            sound_dir: PathBuf::from("assets/sounds"),
            muted: false,
        }
    }
}

impl Config {
    /// Reads a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).wrap_err("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= PLAYER_START_X + PLAYER_WIDTH {
            bail!("screen_width {} is too narrow for the player", self.screen_width);
        }
        if self.screen_height < PLAYER_HEIGHT.max(ENEMY_HEIGHT) {
            bail!("screen_height {} is shorter than a sprite", self.screen_height);
        }
        if self.player_speed <= 0.0 || self.bullet_speed <= 0.0 || self.enemy_speed <= 0.0 {
            bail!("speeds must be positive");
        }
        if self.scroll_step < 0.0 {
            bail!("scroll_step must not be negative");
        }
        if self.starting_lives == 0 {
            bail!("starting_lives must be at least 1");
        }
        if self.frame_ms == 0 {
            bail!("frame_ms must be at least 1");
        }
        Ok(())
    }

    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.fire_cooldown_ms)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
