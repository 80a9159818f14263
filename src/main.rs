use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use grid_snake::config::{ConfigError, GameConfig};
use grid_snake::game::{GameEngine, TickOutcome};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging::{self, LoggingError};
use grid_snake::terminal_runtime::{self, TerminalSession};
use log::{LevelFilter, info};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "grid-snake", version, about = "Grid snake arcade game")]
struct Cli {
    /// Read the game config from this JSON file instead of the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed food placement for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file.
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init_file_logger(path, cli.log_level.into())?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load_from_path(path)?,
        None => GameConfig::load()?,
    };
    info!("starting with {config:?}");

    let mut engine = match cli.seed {
        Some(seed) => GameEngine::new_with_seed(config, seed)?,
        None => GameEngine::new(config)?,
    };

    terminal_runtime::install_panic_hook();
    run(&mut engine)?;

    println!("Game over. Exiting...");
    println!("Score: {}", engine.score());
    Ok(())
}

/// Drives the fixed-rate tick loop until the session ends or the player quits.
fn run(engine: &mut GameEngine) -> io::Result<()> {
    let config = *engine.config();
    let interval = config.tick_interval();
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();

    session.draw(&engine.snapshot(), &config)?;
    let mut next_tick = Instant::now() + interval;

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if let Some(game_input) = input.poll_input(timeout)? {
            match game_input {
                GameInput::Quit => {
                    info!("quit requested after {} ticks", engine.tick_count());
                    return Ok(());
                }
                GameInput::Direction(direction) => engine.request_direction(direction),
            }
            continue;
        }

        if Instant::now() < next_tick {
            continue;
        }
        next_tick += interval;

        let outcome = engine.tick();
        session.draw(&engine.snapshot(), &config)?;

        if matches!(outcome, TickOutcome::GameOver(_) | TickOutcome::Halted) {
            return Ok(());
        }
    }
}
