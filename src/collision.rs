use crate::config::GameConfig;
use crate::snake::{GridPosition, SnakeBody};

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    OutOfBounds,
    SelfIntersection,
}

/// Returns true when `position` lies outside `[0, width) × [0, height)`.
#[must_use]
pub fn out_of_bounds(position: GridPosition, width: u16, height: u16) -> bool {
    position.x < 0
        || position.x >= i32::from(width)
        || position.y < 0
        || position.y >= i32::from(height)
}

/// Evaluates the termination predicate for the body's current state.
///
/// Must run after the body has advanced for the tick. Bounds are checked
/// first, so a head that leaves the field reports `OutOfBounds` even if it
/// would also intersect.
#[must_use]
pub fn detect(snake: &SnakeBody, config: &GameConfig) -> Option<Collision> {
    if out_of_bounds(snake.head_position(), config.width, config.height) {
        return Some(Collision::OutOfBounds);
    }

    if snake.self_intersects() {
        return Some(Collision::SelfIntersection);
    }

    None
}
