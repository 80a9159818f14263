use std::collections::VecDeque;

use crate::input::Direction;

/// Grid-aligned position in playfield units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this position moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when both coordinates are multiples of `cell_size`.
    #[must_use]
    pub fn is_aligned(self, cell_size: u16) -> bool {
        let cell = i32::from(cell_size);
        cell != 0 && self.x % cell == 0 && self.y % cell == 0
    }
}

/// The segmented body: chain of occupied cells, heading, and growth target.
///
/// The chain is stored oldest-first; the back element is the head.
#[derive(Debug, Clone)]
pub struct SnakeBody {
    chain: VecDeque<GridPosition>,
    heading: Option<Direction>,
    target_length: usize,
    cell_size: u16,
}

impl SnakeBody {
    /// Creates a one-cell body at `head` with no heading.
    #[must_use]
    pub fn new(head: GridPosition, cell_size: u16) -> Self {
        let mut chain = VecDeque::new();
        chain.push_back(head);

        Self {
            chain,
            heading: None,
            target_length: 1,
            cell_size,
        }
    }

    /// Creates a body from explicit segments, oldest first (back is head).
    ///
    /// The target length is the segment count.
    #[must_use]
    pub fn from_segments(
        segments: Vec<GridPosition>,
        heading: Option<Direction>,
        cell_size: u16,
    ) -> Self {
        assert!(
            !segments.is_empty(),
            "SnakeBody::from_segments: body needs at least one segment"
        );
        let target_length = segments.len();

        Self {
            chain: VecDeque::from(segments),
            heading,
            target_length,
            cell_size,
        }
    }

    /// Sets the heading used by the next [`advance`](Self::advance).
    ///
    /// Reversals are accepted; turning straight back into the neck collides
    /// on the next tick.
    pub fn change_direction(&mut self, direction: Direction) {
        self.heading = Some(direction);
    }

    /// Appends the next head and trims at most one tail segment.
    ///
    /// Without a heading the new head repeats the current cell, so a grown
    /// body that never started moving runs into itself.
    pub fn advance(&mut self) {
        let (dx, dy) = self
            .heading
            .map_or((0, 0), |direction| direction.delta(self.cell_size));
        let next_head = self.head_position().offset(dx, dy);
        self.chain.push_back(next_head);

        if self.chain.len() > self.target_length {
            let _ = self.chain.pop_front();
        }
    }

    /// Raises the target length by one; the chain catches up on the next advance.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head_position(&self) -> GridPosition {
        *self
            .chain
            .back()
            .expect("snake chain must always contain at least one segment")
    }

    /// Returns true if the head shares a cell with any other segment.
    #[must_use]
    pub fn self_intersects(&self) -> bool {
        let head = self.head_position();
        self.chain
            .iter()
            .take(self.chain.len() - 1)
            .any(|segment| *segment == head)
    }

    /// Returns the current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Iterates over the chain from oldest segment to head.
    pub fn segments(&self) -> impl Iterator<Item = &GridPosition> {
        self.chain.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{GridPosition, SnakeBody};

    #[test]
    fn body_moves_one_cell_per_advance() {
        let mut snake = SnakeBody::new(GridPosition::new(400, 300), 20);
        snake.change_direction(Direction::Right);

        snake.advance();

        assert_eq!(snake.head_position(), GridPosition::new(420, 300));
        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![GridPosition::new(420, 300)]
        );
    }

    #[test]
    fn body_without_heading_repeats_its_head() {
        let mut snake = SnakeBody::new(GridPosition::new(400, 300), 20);

        snake.advance();

        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![GridPosition::new(400, 300)]
        );
        assert!(!snake.self_intersects());
    }

    #[test]
    fn grown_body_without_heading_intersects_itself() {
        let mut snake = SnakeBody::new(GridPosition::new(400, 300), 20);
        snake.grow();

        snake.advance();

        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![GridPosition::new(400, 300), GridPosition::new(400, 300)]
        );
        assert!(snake.self_intersects());
    }

    #[test]
    fn growth_is_observed_on_the_following_advance() {
        let mut snake = SnakeBody::new(GridPosition::new(100, 100), 20);
        snake.change_direction(Direction::Down);
        snake.advance();

        snake.grow();
        assert_eq!(snake.target_length(), 2);
        assert_eq!(snake.len(), 1);

        snake.advance();
        assert_eq!(snake.len(), 2);

        snake.advance();
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn chain_catches_up_one_segment_per_advance() {
        let mut snake = SnakeBody::new(GridPosition::new(100, 100), 20);
        snake.change_direction(Direction::Right);
        snake.grow();
        snake.grow();
        snake.grow();

        let mut lengths = Vec::new();
        for _ in 0..5 {
            snake.advance();
            lengths.push(snake.len());
        }

        assert_eq!(lengths, vec![2, 3, 4, 4, 4]);
    }

    #[test]
    fn reversal_is_accepted_and_collides_with_neck() {
        let mut snake = SnakeBody::from_segments(
            vec![
                GridPosition::new(40, 40),
                GridPosition::new(60, 40),
                GridPosition::new(80, 40),
            ],
            Some(Direction::Right),
            20,
        );

        snake.change_direction(Direction::Left);
        snake.advance();

        assert_eq!(snake.head_position(), GridPosition::new(60, 40));
        assert!(snake.self_intersects());
    }

    #[test]
    fn head_alone_never_intersects() {
        let snake = SnakeBody::new(GridPosition::new(0, 0), 20);
        assert!(!snake.self_intersects());
    }

    #[test]
    fn tight_loop_reenters_own_body() {
        // Oldest first: a 4-cell body whose head turns back into its second segment.
        let mut snake = SnakeBody::from_segments(
            vec![
                GridPosition::new(40, 40),
                GridPosition::new(60, 40),
                GridPosition::new(60, 60),
                GridPosition::new(40, 60),
            ],
            Some(Direction::Left),
            20,
        );
        snake.grow();

        snake.change_direction(Direction::Up);
        snake.advance();

        assert_eq!(snake.head_position(), GridPosition::new(40, 40));
        assert!(snake.self_intersects());
    }

    #[test]
    fn alignment_check_uses_cell_size() {
        assert!(GridPosition::new(40, 380).is_aligned(20));
        assert!(!GridPosition::new(41, 380).is_aligned(20));
        assert!(!GridPosition::new(0, 0).is_aligned(0));
    }
}
