use std::fs::File;
use std::io;
use std::path::Path;

use log::{LevelFilter, SetLoggerError};
use simplelog::{Config, WriteLogger};
use thiserror::Error;

/// Failures while installing the file logger.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file {path}: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("a logger is already installed: {0}")]
    AlreadyInstalled(#[from] SetLoggerError),
}

/// Routes `log` output to `path`. The terminal is owned by the renderer while
/// the game runs, so nothing is ever logged to stdout or stderr.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), LoggingError> {
    let file = File::create(path).map_err(|source| LoggingError::CreateFile {
        path: path.display().to_string(),
        source,
    })?;

    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}
