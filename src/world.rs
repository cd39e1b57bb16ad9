//! Simulation context: entities, score, and the game state machine.
//!
//! A [`World`] only changes inside [`World::tick`] and [`World::apply`]; the
//! presentation layer reads it through [`World::snapshot`].

use rand::Rng;
use std::time::Instant;

use crate::collision;
use crate::config::Config;
use crate::entities::{Bullet, Enemy, Explosion, GameState, Player};
use crate::events::GameEvent;
use crate::input::{Action, InputState};
use crate::spawner::Spawner;

/// Read-only view of everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: GameState,
    pub background_x: f32,
    pub player: &'a Player,
    pub bullets: &'a [Bullet],
    pub enemies: &'a [Enemy],
    pub explosions: &'a [Explosion],
    pub score: u32,
    pub screen_width: f32,
    pub screen_height: f32,
}

#[derive(Debug, Clone)]
pub struct World {
    pub(crate) config: Config,
    pub(crate) state: GameState,
    pub(crate) player: Player,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) explosions: Vec<Explosion>,
    pub(crate) score: u32,
    pub(crate) background_x: f32,
    spawner: Spawner,
    frame_count: u64,
}

impl World {
    pub fn new(config: Config) -> Self {
        let player = Player::new(
            config.screen_height,
            config.player_speed,
            config.starting_lives,
        );
        Self {
            config,
            state: GameState::Idle,
            player,
            enemies: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            background_x: 0.0,
            spawner: Spawner::new(),
            frame_count: 0,
        }
    }

    /// Advances the world by one frame.
    ///
    /// One-shot actions pressed this frame are applied first; the simulation
    /// body then runs only while the game is running. Returns the events of
    /// this frame in the order they happened.
    pub fn tick<R: Rng>(
        &mut self,
        input: &InputState,
        now: Instant,
        rng: &mut R,
    ) -> Vec<GameEvent> {
        let mut events: Vec<GameEvent> = input
            .pressed()
            .iter()
            .filter_map(|&action| self.apply(action))
            .collect();

        if !self.state.is_simulating() {
            return events;
        }

        self.frame_count += 1;

        if let Some(enemy) = self.spawner.tick(&self.config, rng) {
            self.enemies.push(enemy);
        }

        self.update_motion(input, now, &mut events);

        events.extend(collision::resolve_bullet_hits(self));
        events.extend(collision::resolve_player_hits(self));

        events
    }

    /// Applies a discrete state-machine trigger
    pub fn apply(&mut self, action: Action) -> Option<GameEvent> {
        match (action, self.state) {
            (Action::Confirm | Action::Restart, GameState::Idle) => {
                self.state = GameState::Running;
                log::info!("Game started");
                Some(GameEvent::Started)
            }
            (Action::Confirm | Action::Restart, GameState::GameOver) => {
                self.restart();
                Some(GameEvent::Restarted)
            }
            (Action::PauseToggle, GameState::Running) => {
                self.state = GameState::Paused;
                log::info!("Game paused");
                Some(GameEvent::Paused)
            }
            (Action::PauseToggle, GameState::Paused) => {
                self.state = GameState::Running;
                log::info!("Game resumed");
                Some(GameEvent::Resumed)
            }
            _ => None,
        }
    }

    /// Resets score, lives, and all entities and starts a new run
    pub fn restart(&mut self) {
        self.player = Player::new(
            self.config.screen_height,
            self.config.player_speed,
            self.config.starting_lives,
        );
        self.enemies.clear();
        self.explosions.clear();
        self.score = 0;
        self.spawner.reset();
        self.state = GameState::Running;
        log::info!("Game restarted");
    }

    /// Moves the game to its terminal state. Safe to call more than once.
    pub(crate) fn end_run(&mut self) -> Option<GameEvent> {
        if self.state != GameState::Running {
            return None;
        }
        self.state = GameState::GameOver;
        log::info!("Game over with score {}", self.score);
        Some(GameEvent::GameOver)
    }

    fn update_motion(&mut self, input: &InputState, now: Instant, events: &mut Vec<GameEvent>) {
        // Background wraps after scrolling one full screen
        self.background_x -= self.config.scroll_step;
        if self.background_x <= -self.config.screen_width {
            self.background_x = 0.0;
        }

        let max_y = (self.config.screen_height - self.player.height).max(0.0);
        if input.is_held(Action::MoveUp) {
            self.player.move_up(0.0);
        }
        if input.is_held(Action::MoveDown) {
            self.player.move_down(max_y);
        }

        if input.is_held(Action::Fire)
            && self
                .player
                .try_fire(now, self.config.fire_cooldown(), self.config.bullet_speed)
        {
            events.push(GameEvent::ShotFired);
        }

        self.player.update_bullets(self.config.screen_width);

        for enemy in &mut self.enemies {
            enemy.update();
        }
        self.enemies.retain(|e| !e.is_off_screen());

        for explosion in &mut self.explosions {
            explosion.update();
        }
        self.explosions.retain(|e| !e.is_done());
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            background_x: self.background_x,
            player: &self.player,
            bullets: &self.player.bullets,
            enemies: &self.enemies,
            explosions: &self.explosions,
            score: self.score,
            screen_width: self.config.screen_width,
            screen_height: self.config.screen_height,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn background_x(&self) -> f32 {
        self.background_x
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Direct access for setting up scenarios
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    pub fn explosions_mut(&mut self) -> &mut Vec<Explosion> {
        &mut self.explosions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn running_world() -> World {
        let mut world = World::new(Config::default());
        world.apply(Action::Confirm);
        world
    }

    #[test]
    fn test_new_world_is_idle() {
        let world = World::new(Config::default());
        assert_eq!(world.state(), GameState::Idle);
        assert_eq!(world.score(), 0);
        assert_eq!(world.player().lives, 3);
        assert_eq!(world.player().y, 175.0);
        assert!(world.enemies().is_empty());
        assert!(world.explosions().is_empty());
    }

    #[test]
    fn test_confirm_starts_from_idle() {
        let mut world = World::new(Config::default());
        assert_eq!(world.apply(Action::Confirm), Some(GameEvent::Started));
        assert_eq!(world.state(), GameState::Running);
    }

    #[test]
    fn test_repeated_start_while_running_is_noop() {
        let mut world = running_world();
        world.score = 30;
        assert_eq!(world.apply(Action::Confirm), None);
        assert_eq!(world.apply(Action::Restart), None);
        assert_eq!(world.state(), GameState::Running);
        assert_eq!(world.score(), 30);
    }

    #[test]
    fn test_pause_toggle() {
        let mut world = running_world();
        assert_eq!(world.apply(Action::PauseToggle), Some(GameEvent::Paused));
        assert_eq!(world.state(), GameState::Paused);
        assert_eq!(world.apply(Action::PauseToggle), Some(GameEvent::Resumed));
        assert_eq!(world.state(), GameState::Running);
    }

    #[test]
    fn test_pause_ignored_when_idle_or_over() {
        let mut world = World::new(Config::default());
        assert_eq!(world.apply(Action::PauseToggle), None);
        assert_eq!(world.state(), GameState::Idle);

        let mut world = running_world();
        world.end_run();
        assert_eq!(world.apply(Action::PauseToggle), None);
        assert_eq!(world.state(), GameState::GameOver);
    }

    #[test]
    fn test_confirm_while_paused_does_not_resume() {
        let mut world = running_world();
        world.apply(Action::PauseToggle);
        assert_eq!(world.apply(Action::Confirm), None);
        assert_eq!(world.state(), GameState::Paused);
    }

    #[test]
    fn test_end_run_only_fires_once() {
        let mut world = running_world();
        assert_eq!(world.end_run(), Some(GameEvent::GameOver));
        assert_eq!(world.end_run(), None);
    }

    #[test]
    fn test_background_wraps_after_full_screen() {
        let mut world = running_world();
        let mut rng = StdRng::seed_from_u64(9);
        let input = InputState::new();
        let now = Instant::now();

        world.tick(&input, now, &mut rng);
        assert_eq!(world.background_x(), -2.0);

        // 800 / 2 = 400 ticks to reach -800, which wraps to 0
        for _ in 1..400 {
            world.tick(&input, now, &mut rng);
        }
        assert_eq!(world.background_x(), 0.0);
    }

    #[test]
    fn test_tick_applies_pressed_actions_first() {
        let mut world = World::new(Config::default());
        let mut rng = StdRng::seed_from_u64(9);
        let mut input = InputState::new();
        input.set(Action::Confirm, true);

        let events = world.tick(&input, Instant::now(), &mut rng);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(world.frame_count(), 1);
        assert_eq!(world.background_x(), -2.0);
    }

    #[test]
    fn test_explosions_count_down_and_disappear() {
        let mut world = running_world();
        let mut rng = StdRng::seed_from_u64(9);
        let input = InputState::new();
        let now = Instant::now();
        world.explosions_mut().push(Explosion::new(0.0, 0.0, 2));

        world.tick(&input, now, &mut rng);
        assert_eq!(world.explosions()[0].timer, 1);
        world.tick(&input, now, &mut rng);
        assert!(world.explosions().is_empty());
    }

    #[test]
    fn test_snapshot_mirrors_world() {
        let mut world = running_world();
        world.enemies_mut().push(Enemy::new(300.0, 10.0, 2.5));
        world.score = 40;

        let view = world.snapshot();
        assert_eq!(view.state, GameState::Running);
        assert_eq!(view.enemies.len(), 1);
        assert_eq!(view.score, 40);
        assert_eq!(view.player.lives, 3);
        assert_eq!(view.screen_width, 800.0);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn held_input(up: bool, down: bool) -> InputState {
            let mut input = InputState::new();
            input.set(Action::MoveUp, up);
            input.set(Action::MoveDown, down);
            input
        }

        proptest! {
            #[test]
            fn test_player_clamped_for_any_input(
                moves in prop::collection::vec((any::<bool>(), any::<bool>()), 0..300)
            ) {
                let mut world = running_world();
                let mut rng = StdRng::seed_from_u64(5);
                let now = Instant::now();
                for (up, down) in moves {
                    world.tick(&held_input(up, down), now, &mut rng);
                    let y = world.player().y;
                    prop_assert!(y >= 0.0);
                    prop_assert!(y <= 400.0 - 50.0);
                }
            }

            #[test]
            fn test_score_never_decreases(seed in any::<u64>(), fire in any::<bool>()) {
                let mut world = running_world();
                let mut rng = StdRng::seed_from_u64(seed);
                let mut input = InputState::new();
                input.set(Action::Fire, fire);
                let start = Instant::now();
                let mut last_score = 0;
                for frame in 0..600u64 {
                    let now = start + std::time::Duration::from_millis(frame * 16);
                    world.tick(&input, now, &mut rng);
                    prop_assert!(world.score() >= last_score);
                    prop_assert_eq!(world.score() % 10, 0);
                    last_score = world.score();
                }
            }
        }
    }
}
