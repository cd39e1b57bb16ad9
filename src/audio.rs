use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::Config;
use crate::events::GameEvent;

type Sound = Buffered<Decoder<BufReader<File>>>;

const SHOT_FILE: &str = "blaster-pew.wav";
const BOOM_FILE: &str = "boom.wav";
const DIE_FILE: &str = "dies.wav";
const MUSIC_FILE: &str = "bgmusic.mp3";

const EFFECT_VOLUME: f32 = 0.4;
const MUSIC_VOLUME: f32 = 0.25;

/// Plays sound effects and background music in response to game events.
/// Every sound is optional; anything that fails to load is simply skipped.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    shot: Option<Sound>,
    boom: Option<Sound>,
    die: Option<Sound>,
    music: Option<Sink>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads the sounds in `config.sound_dir`
    pub fn new(config: &Config) -> Self {
        if config.muted {
            log::info!("Audio muted");
            return Self::silent();
        }

        let (stream, handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(err) => {
                log::warn!("Failed to open audio output: {}. Continuing without audio", err);
                return Self::silent();
            }
        };

        let dir = config.sound_dir.as_path();
        let music = load_music(&handle, dir);

        Self {
            shot: load_sound(dir, SHOT_FILE),
            boom: load_sound(dir, BOOM_FILE),
            die: load_sound(dir, DIE_FILE),
            music,
            output: Some((stream, handle)),
        }
    }

    /// An audio manager that never makes a sound
    pub fn silent() -> Self {
        Self {
            output: None,
            shot: None,
            boom: None,
            die: None,
            music: None,
        }
    }

    pub fn handle(&self, event: &GameEvent) {
        match event {
            GameEvent::ShotFired => self.play(&self.shot),
            GameEvent::EnemyDestroyed { .. } => self.play(&self.boom),
            GameEvent::PlayerHit { .. } => self.play(&self.die),
            GameEvent::Started | GameEvent::Restarted => {
                if let Some(music) = &self.music {
                    music.play();
                }
            }
            GameEvent::GameOver => {
                if let Some(music) = &self.music {
                    music.pause();
                }
            }
            GameEvent::Paused | GameEvent::Resumed => {}
        }
    }

    /// Fire-and-forget playback of a pre-loaded sound
    fn play(&self, sound: &Option<Sound>) {
        let (Some((_, handle)), Some(sound)) = (&self.output, sound) else {
            return;
        };
        // Ignore errors for sound playback - don't want to crash the game
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(EFFECT_VOLUME);
            // Clone the buffered source (fast - just clones references)
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

fn open_decoder(path: &Path) -> Option<Decoder<BufReader<File>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            log::warn!("Missing sound {}: {}", path.display(), err);
            return None;
        }
    };
    match Decoder::new(BufReader::new(file)) {
        Ok(decoder) => Some(decoder),
        Err(err) => {
            log::warn!("Unreadable sound {}: {}", path.display(), err);
            None
        }
    }
}

fn load_sound(dir: &Path, name: &str) -> Option<Sound> {
    open_decoder(&dir.join(name)).map(|decoder| decoder.buffered())
}

/// Queues the looping music track paused, so the first start can resume it
fn load_music(handle: &OutputStreamHandle, dir: &Path) -> Option<Sink> {
    let decoder = open_decoder(&dir.join(MUSIC_FILE))?;
    let sink = Sink::try_new(handle)
        .map_err(|err| log::warn!("Failed to create music sink: {}", err))
        .ok()?;
    sink.set_volume(MUSIC_VOLUME);
    sink.pause();
    sink.append(decoder.repeat_infinite());
    Some(sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_manager_ignores_events() {
        let audio = AudioManager::silent();
        for event in [
            GameEvent::Started,
            GameEvent::ShotFired,
            GameEvent::EnemyDestroyed { x: 0.0, y: 0.0 },
            GameEvent::PlayerHit { lives: 2 },
            GameEvent::GameOver,
        ] {
            audio.handle(&event);
        }
    }

    #[test]
    fn test_muted_config_skips_device() {
        let config = Config {
            muted: true,
            ..Config::default()
        };
        let audio = AudioManager::new(&config);
        assert!(audio.output.is_none());
        assert!(audio.music.is_none());
    }

    #[test]
    fn test_missing_sound_files_are_tolerated() {
        assert!(load_sound(Path::new("no/such/dir"), SHOT_FILE).is_none());
    }
}
