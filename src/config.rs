use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::GridPosition;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Reference playfield width in grid units.
pub const DEFAULT_WIDTH: u16 = 800;

/// Reference playfield height in grid units.
pub const DEFAULT_HEIGHT: u16 = 600;

/// Reference edge length of one grid cell.
pub const DEFAULT_CELL_SIZE: u16 = 20;

/// Number of food items kept on the board.
pub const DEFAULT_MAX_FOOD_ITEMS: usize = 3;

/// Reference tick rate.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 10;

/// Lifetime in ticks given to every freshly spawned food item.
pub const DEFAULT_FOOD_LIFETIME: u32 = 30;

/// Snake segment colour.
pub const SNAKE_COLOR: Color = Color::Rgb(55, 120, 255);

/// Food colour.
pub const FOOD_COLOR: Color = Color::Rgb(120, 255, 55);

/// Score text colour.
pub const TEXT_COLOR: Color = Color::Rgb(200, 200, 200);

/// Playfield background.
pub const BG_COLOR: Color = Color::Black;

/// One grid cell is drawn two terminal columns wide to keep cells square.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

pub const GLYPH_SNAKE_BODY: &str = "██";
pub const GLYPH_SNAKE_HEAD: &str = "▓▓";
pub const GLYPH_FOOD: &str = "◖◗";

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell_size must be greater than zero")]
    ZeroCellSize,
    #[error("playfield {width}x{height} must be larger than one cell of size {cell_size}")]
    PlayfieldTooSmall {
        width: u16,
        height: u16,
        cell_size: u16,
    },
    #[error("max_food_items must be at least 1")]
    NoFood,
    #[error("ticks_per_second must be greater than zero")]
    ZeroTickRate,
    #[error("food_lifetime must be greater than zero when expire_food is enabled")]
    ZeroFoodLifetime,
}

/// Immutable game configuration, built once and handed to the engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub cell_size: u16,
    pub max_food_items: usize,
    pub ticks_per_second: u32,
    /// Initial `remaining_lifetime` of spawned food.
    pub food_lifetime: u32,
    /// Counts food lifetime down each tick and respawns expired items.
    /// When off, the lifetime is carried but never read.
    pub expire_food: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            max_food_items: DEFAULT_MAX_FOOD_ITEMS,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            food_lifetime: DEFAULT_FOOD_LIFETIME,
            expire_food: false,
        }
    }
}

impl GameConfig {
    /// Returns the starting head: the playfield centre floored to the grid.
    #[must_use]
    pub fn initial_head(&self) -> GridPosition {
        let cell = i32::from(self.cell_size.max(1));
        GridPosition {
            x: (i32::from(self.width) / 2) / cell * cell,
            y: (i32::from(self.height) / 2) / cell * cell,
        }
    }

    /// Returns the wall-clock duration of one tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.ticks_per_second.max(1)))
    }

    /// Number of grid columns on the playfield.
    #[must_use]
    pub fn columns(&self) -> u16 {
        self.width / self.cell_size.max(1)
    }

    /// Number of grid rows on the playfield.
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.height / self.cell_size.max(1)
    }

    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.width <= self.cell_size || self.height <= self.cell_size {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
            });
        }
        if self.max_food_items == 0 {
            return Err(ConfigError::NoFood);
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        if self.expire_food && self.food_lifetime == 0 {
            return Err(ConfigError::ZeroFoodLifetime);
        }
        Ok(())
    }

    /// Loads the user config file, falling back to defaults when it is absent.
    ///
    /// Returns `Err` when the file exists but cannot be read, parsed, or
    /// validated, so the caller can report it before entering raw mode.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    /// Loads and validates a JSON config file. Missing fields take defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config =
            serde_json::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}
