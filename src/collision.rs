//! Collision passes run after motion on every simulation tick.
//!
//! Both passes walk the enemy list back to front so removing by index never
//! skips or revisits an entity.

use crate::entities::Explosion;
use crate::events::GameEvent;
use crate::world::World;

/// Bullets against enemies. Each enemy is destroyed by at most one bullet.
pub fn resolve_bullet_hits(world: &mut World) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for e_idx in (0..world.enemies.len()).rev() {
        let enemy_box = world.enemies[e_idx].bounds();
        let hit = world
            .player
            .bullets
            .iter()
            .rposition(|bullet| bullet.bounds().intersects(&enemy_box));

        if let Some(b_idx) = hit {
            let enemy = world.enemies.remove(e_idx);
            world.player.bullets.remove(b_idx);
            world.explosions.push(Explosion::new(
                enemy.x,
                enemy.y,
                world.config.explosion_frames,
            ));
            world.score = world.score.saturating_add(world.config.kill_score);
            log::debug!("Enemy destroyed at ({}, {})", enemy.x, enemy.y);
            events.push(GameEvent::EnemyDestroyed {
                x: enemy.x,
                y: enemy.y,
            });
        }
    }

    events
}

/// Enemies ramming the player. Every hit costs one life and the terminal
/// check runs after each one.
pub fn resolve_player_hits(world: &mut World) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let player_box = world.player.bounds();

    for e_idx in (0..world.enemies.len()).rev() {
        if !world.enemies[e_idx].bounds().intersects(&player_box) {
            continue;
        }

        world.enemies.remove(e_idx);
        let lives = world.player.lose_life();
        log::debug!("Player hit, {} lives left", lives);
        events.push(GameEvent::PlayerHit { lives });

        if !world.player.is_alive() {
            events.extend(world.end_run());
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::entities::{Bullet, Enemy, GameState};
    use crate::input::Action;

    fn running_world() -> World {
        let mut world = World::new(Config::default());
        world.apply(Action::Confirm);
        world
    }

    #[test]
    fn test_bullet_destroys_enemy() {
        let mut world = running_world();
        world.enemies_mut().push(Enemy::new(0.0, 100.0, 2.5));
        world.player_mut().bullets.push(Bullet::new(10.0, 105.0, 7.0));

        let events = resolve_bullet_hits(&mut world);

        assert!(world.enemies().is_empty());
        assert!(world.player().bullets.is_empty());
        assert_eq!(world.explosions().len(), 1);
        assert_eq!(world.explosions()[0], Explosion::new(0.0, 100.0, 20));
        assert_eq!(world.score(), 10);
        assert_eq!(events, vec![GameEvent::EnemyDestroyed { x: 0.0, y: 100.0 }]);
    }

    #[test]
    fn test_enemy_credited_once_with_two_bullets() {
        let mut world = running_world();
        world.enemies_mut().push(Enemy::new(300.0, 100.0, 2.5));
        world.player_mut().bullets.push(Bullet::new(305.0, 105.0, 7.0));
        world.player_mut().bullets.push(Bullet::new(310.0, 110.0, 7.0));

        resolve_bullet_hits(&mut world);

        assert_eq!(world.score(), 10);
        assert_eq!(world.player().bullets.len(), 1);
        // Newest bullet is consumed first
        assert_eq!(world.player().bullets[0].x, 305.0);
    }

    #[test]
    fn test_one_bullet_cannot_kill_two_enemies() {
        let mut world = running_world();
        world.enemies_mut().push(Enemy::new(300.0, 100.0, 2.5));
        world.enemies_mut().push(Enemy::new(305.0, 100.0, 2.5));
        world.player_mut().bullets.push(Bullet::new(310.0, 110.0, 7.0));

        resolve_bullet_hits(&mut world);

        assert_eq!(world.score(), 10);
        assert_eq!(world.enemies().len(), 1);
        // Last enemy is checked first
        assert_eq!(world.enemies()[0].x, 300.0);
    }

    #[test]
    fn test_miss_leaves_everything() {
        let mut world = running_world();
        world.enemies_mut().push(Enemy::new(300.0, 100.0, 2.5));
        world.player_mut().bullets.push(Bullet::new(300.0, 140.0, 7.0));

        let events = resolve_bullet_hits(&mut world);

        assert!(events.is_empty());
        assert_eq!(world.enemies().len(), 1);
        assert_eq!(world.player().bullets.len(), 1);
    }

    #[test]
    fn test_score_saturates_with_huge_kill_score() {
        let mut world = World::new(Config {
            kill_score: u32::MAX,
            ..Config::default()
        });
        world.apply(Action::Confirm);
        for x in [100.0, 300.0] {
            world.enemies_mut().push(Enemy::new(x, 100.0, 2.5));
            world.player_mut().bullets.push(Bullet::new(x + 5.0, 105.0, 7.0));
        }

        resolve_bullet_hits(&mut world);

        assert!(world.enemies().is_empty());
        assert_eq!(world.score(), u32::MAX);
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let mut world = running_world();
        world.player_mut().y = 100.0;
        world.player_mut().lives = 1;
        world.enemies_mut().push(Enemy::new(50.0, 100.0, 2.5));

        let events = resolve_player_hits(&mut world);

        assert!(world.enemies().is_empty());
        assert_eq!(world.player().lives, 0);
        assert_eq!(world.state(), GameState::GameOver);
        assert_eq!(
            events,
            vec![GameEvent::PlayerHit { lives: 0 }, GameEvent::GameOver]
        );
    }

    #[test]
    fn test_every_simultaneous_hit_costs_a_life() {
        let mut world = running_world();
        world.player_mut().y = 100.0;
        world.player_mut().lives = 2;
        for offset in [0.0, 5.0, 10.0] {
            world
                .enemies_mut()
                .push(Enemy::new(60.0 + offset, 100.0, 2.5));
        }

        let events = resolve_player_hits(&mut world);

        assert!(world.enemies().is_empty());
        assert_eq!(world.player().lives, 0);
        assert_eq!(world.state(), GameState::GameOver);
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerHit { lives: 1 },
                GameEvent::PlayerHit { lives: 0 },
                GameEvent::GameOver,
                GameEvent::PlayerHit { lives: 0 },
            ]
        );
    }

    #[test]
    fn test_hit_with_lives_left_keeps_running() {
        let mut world = running_world();
        world.player_mut().y = 100.0;
        world.enemies_mut().push(Enemy::new(80.0, 120.0, 2.5));

        let events = resolve_player_hits(&mut world);

        assert_eq!(world.player().lives, 2);
        assert_eq!(world.state(), GameState::Running);
        assert_eq!(events, vec![GameEvent::PlayerHit { lives: 2 }]);
    }
}
