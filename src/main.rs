use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};

use side_blaster::Config;
use side_blaster::app::App;

/// Side-scrolling arcade shooter for the terminal
#[derive(Debug, Parser)]
#[command(name = "side-blaster", version, about)]
struct Cli {
    /// JSON file overriding the default game constants
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the enemy spawn sequence
    #[arg(long)]
    seed: Option<u64>,
    /// Disable all sound
    #[arg(long)]
    mute: bool,
    /// Where log output goes (the terminal is taken by the game)
    #[arg(long, default_value = "side-blaster.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.mute {
        config.muted = true;
    }
    config.validate()?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!(
        "Keyboard enhancement supported: {}",
        supports_keyboard_enhancement
    );

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(config, cli.seed, supports_keyboard_enhancement).run(&mut terminal);

    // Cleanup
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Routes `log` output into a file; `RUST_LOG` picks the level (default info)
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
