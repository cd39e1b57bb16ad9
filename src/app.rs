use color_eyre::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Instant;

use crate::audio::AudioManager;
use crate::config::Config;
use crate::events::GameEvent;
use crate::input::InputManager;
use crate::renderer::GameRenderer;
use crate::world::World;

/// The main application: owns the world and the collaborators around it.
pub struct App {
    running: bool,
    world: World,
    rng: StdRng,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    ///
    /// `seed` fixes the enemy spawn sequence; `reports_release` tells the
    /// input manager whether the terminal sends key release events.
    pub fn new(config: Config, seed: Option<u64>, reports_release: bool) -> Self {
        let rng = match seed {
            Some(seed) => {
                log::info!("Using spawn seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        Self {
            running: true,
            audio_manager: AudioManager::new(&config),
            world: World::new(config),
            rng,
            input_manager: InputManager::new(reports_release),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let frame_period = self.world.config().frame_period();

        while self.running {
            let frame_start = Instant::now();

            terminal.draw(|frame| {
                let view = self.world.snapshot();
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events()?;
            if self.input_manager.quit_requested() {
                self.running = false;
                break;
            }

            let events = self
                .world
                .tick(self.input_manager.input(), Instant::now(), &mut self.rng);
            self.dispatch(&events);

            // Sleep off the rest of the frame to hold a steady tick rate
            if let Some(rest) = frame_period.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        log::info!("Quit with score {}", self.world.score());
        Ok(())
    }

    /// Hands the events of one tick to the collaborators
    fn dispatch(&self, events: &[GameEvent]) {
        for event in events {
            log::debug!("{:?}", event);
            self.audio_manager.handle(event);
        }
    }
}
