use rand::Rng;

use crate::config::GameConfig;
use crate::snake::GridPosition;

/// Food item currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: GridPosition,
    /// Ticks left before the item expires. Only counted down when food
    /// expiry is enabled in the config.
    pub remaining_lifetime: u32,
}

impl Food {
    #[must_use]
    pub fn new(position: GridPosition, lifetime: u32) -> Self {
        Self {
            position,
            remaining_lifetime: lifetime,
        }
    }

    /// Counts the lifetime down by one tick. Returns `true` once it hits zero.
    pub fn tick_lifetime(&mut self) -> bool {
        self.remaining_lifetime = self.remaining_lifetime.saturating_sub(1);
        self.remaining_lifetime == 0
    }
}

/// Draws a random grid-aligned position inside the playfield.
///
/// Each coordinate is drawn from `[0, dimension - cell_size)` and floored to a
/// multiple of `cell_size`. The snake and other food are not avoided, so a
/// spawn may land on an occupied cell.
#[must_use]
pub fn spawn_one<R: Rng + ?Sized>(
    rng: &mut R,
    width: u16,
    height: u16,
    cell_size: u16,
) -> GridPosition {
    debug_assert!(cell_size > 0 && width > cell_size && height > cell_size);

    let cell = i32::from(cell_size);
    let x = rng.gen_range(0..i32::from(width) - cell);
    let y = rng.gen_range(0..i32::from(height) - cell);

    GridPosition {
        x: x / cell * cell,
        y: y / cell * cell,
    }
}

/// Bounded set of active food items.
#[derive(Debug, Clone)]
pub struct FoodPool {
    items: Vec<Food>,
    capacity: usize,
}

impl FoodPool {
    /// Creates an empty pool holding at most `capacity` items.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Replaces the pool contents with `count` fresh spawns, capped at capacity.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig, count: usize) {
        self.items.clear();
        for _ in 0..count.min(self.capacity) {
            let _ = self.spawn_replacement(rng, config);
        }
    }

    /// Removes one item at `position`. Returns whether anything was eaten.
    ///
    /// When several items share the cell only the first is removed.
    pub fn consume_at(&mut self, position: GridPosition) -> bool {
        let Some(index) = self.items.iter().position(|food| food.position == position) else {
            return false;
        };

        self.items.remove(index);
        true
    }

    /// Spawns one item with full lifetime. Returns `false` when the pool is full.
    pub fn spawn_replacement<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }

        let position = spawn_one(rng, config.width, config.height, config.cell_size);
        self.items.push(Food::new(position, config.food_lifetime));
        true
    }

    /// Counts every item's lifetime down and drops the expired ones.
    /// Returns how many expired.
    pub fn expire_tick(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain_mut(|food| !food.tick_lifetime());
        before - self.items.len()
    }

    /// Inserts an item directly, ignoring the spawner. Returns `false` when full.
    pub fn insert(&mut self, food: Food) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push(food);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.items.iter()
    }

    /// Returns the positions of all active items.
    #[must_use]
    pub fn positions(&self) -> Vec<GridPosition> {
        self.items.iter().map(|food| food.position).collect()
    }
}
