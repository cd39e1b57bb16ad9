//! Side-scrolling arcade shooter.
//!
//! The simulation core (`world`, `spawner`, `collision`, `entities`) is pure
//! and deterministic given its input, clock, and random source. `renderer`,
//! `audio`, and `app` form the terminal front end around it.

// Library exports for testing
pub use config::Config;
pub use entities::{Bounds, Bullet, Enemy, Explosion, GameState, Player};
pub use events::GameEvent;
pub use input::{Action, InputState};
pub use spawner::Spawner;
pub use world::{Snapshot, World};

pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod entities;
pub mod events;
pub mod input;
pub mod renderer;
pub mod spawner;
pub mod world;
