mod bounds;
mod bullet;
mod enemy;
mod explosion;
mod game_state;
mod player;

// Re-export all public types
pub use bounds::Bounds;
pub use bullet::{BULLET_HEIGHT, BULLET_WIDTH, Bullet};
pub use enemy::{ENEMY_HEIGHT, ENEMY_WIDTH, Enemy};
pub use explosion::Explosion;
pub use game_state::GameState;
pub use player::{PLAYER_HEIGHT, PLAYER_START_X, PLAYER_WIDTH, Player};
