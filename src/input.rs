use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the movement vector for one step, scaled by `cell_size`.
    #[must_use]
    pub fn delta(self, cell_size: u16) -> (i32, i32) {
        let step = i32::from(cell_size);
        match self {
            Self::Up => (0, -step),
            Self::Down => (0, step),
            Self::Left => (-step, 0),
            Self::Right => (step, 0),
        }
    }

    /// Converts a raw movement vector into a direction.
    ///
    /// Only the four canonical vectors `(±cell_size, 0)` and `(0, ±cell_size)`
    /// are accepted.
    pub fn from_vector(dx: i32, dy: i32, cell_size: u16) -> Result<Self, InputError> {
        let step = i32::from(cell_size);
        match (dx, dy) {
            _ if step == 0 => Err(InputError::NonCanonical { dx, dy }),
            (0, y) if y == -step => Ok(Self::Up),
            (0, y) if y == step => Ok(Self::Down),
            (x, 0) if x == -step => Ok(Self::Left),
            (x, 0) if x == step => Ok(Self::Right),
            _ => Err(InputError::NonCanonical { dx, dy }),
        }
    }
}

/// Rejected direction requests.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum InputError {
    #[error("direction vector ({dx}, {dy}) is not one of the four grid-aligned unit steps")]
    NonCanonical { dx: i32, dy: i32 },
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
}

/// Maps a terminal key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Direction::Up,
        KeyCode::Down | KeyCode::Char('s' | 'S') => Direction::Down,
        KeyCode::Left | KeyCode::Char('a' | 'A') => Direction::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D') => Direction::Right,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => return Some(GameInput::Quit),
        _ => return None,
    };

    Some(GameInput::Direction(direction))
}

/// Polls the terminal for keyboard input.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one event and returns the mapped input, if any.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}
