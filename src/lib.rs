//! Grid snake: a segmented body moving on a discrete grid, growing by eating
//! food and ending on a wall hit or self-intersection.
//!
//! The game-state engine lives in [`game`] and its leaf components; the
//! terminal front-end ([`renderer`], [`input`], [`terminal_runtime`]) only
//! reads snapshots and forwards direction requests.

pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
