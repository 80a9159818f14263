use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, Collision};
use crate::config::{ConfigError, GameConfig};
use crate::food::FoodPool;
use crate::input::{Direction, InputError};
use crate::score::ScoreTracker;
use crate::snake::{GridPosition, SnakeBody};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// What a single call to [`GameEngine::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The body advanced (in place when it has no heading yet) and nothing
    /// was eaten.
    Advanced,
    /// The head landed on food; the body will be one longer next tick.
    Ate,
    /// The tick ended the session.
    GameOver(Collision),
    /// The session was already over; nothing changed.
    Halted,
}

/// Read-only view of the game handed to the renderer once per tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameSnapshot {
    /// Body chain from oldest segment to head.
    pub body: Vec<GridPosition>,
    pub food: Vec<GridPosition>,
    pub score: u32,
    pub status: GameStatus,
}

impl GameSnapshot {
    #[must_use]
    pub fn head(&self) -> Option<GridPosition> {
        self.body.last().copied()
    }
}

/// Owns the whole game state and advances it one tick at a time.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    snake: SnakeBody,
    foods: FoodPool,
    score: ScoreTracker,
    status: GameStatus,
    pending_direction: Option<Direction>,
    death_cause: Option<Collision>,
    tick_count: u64,
    rng: StdRng,
}

impl GameEngine {
    /// Creates a new session with an entropy-seeded spawner.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a seeded session from an explicit body and food pool, for
    /// replaying a known board position.
    pub fn with_state(
        config: GameConfig,
        snake: SnakeBody,
        foods: FoodPool,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, snake, foods, StdRng::seed_from_u64(seed)))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let snake = SnakeBody::new(config.initial_head(), config.cell_size);
        let mut foods = FoodPool::new(config.max_food_items);
        foods.initialize(&mut rng, &config, config.max_food_items);

        Ok(Self::assemble(config, snake, foods, rng))
    }

    fn assemble(config: GameConfig, snake: SnakeBody, foods: FoodPool, rng: StdRng) -> Self {
        Self {
            config,
            snake,
            foods,
            score: ScoreTracker::new(),
            status: GameStatus::Running,
            pending_direction: None,
            death_cause: None,
            tick_count: 0,
            rng,
        }
    }

    /// Records a direction for the next tick. Later requests overwrite
    /// earlier ones that have not been applied yet.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.pending_direction = Some(direction);
        }
    }

    /// Records a raw movement vector, rejecting anything but the four
    /// canonical grid steps. A rejected vector leaves the pending direction
    /// untouched.
    pub fn request_vector(&mut self, dx: i32, dy: i32) -> Result<(), InputError> {
        let direction = Direction::from_vector(dx, dy, self.config.cell_size)?;
        self.request_direction(direction);
        Ok(())
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status == GameStatus::GameOver {
            return TickOutcome::Halted;
        }

        self.tick_count += 1;

        if let Some(direction) = self.pending_direction.take() {
            self.snake.change_direction(direction);
        }

        self.snake.advance();

        if let Some(cause) = collision::detect(&self.snake, &self.config) {
            self.status = GameStatus::GameOver;
            self.death_cause = Some(cause);
            info!(
                "game over after {} ticks: {cause:?}, score {}",
                self.tick_count,
                self.score.points()
            );
            return TickOutcome::GameOver(cause);
        }

        let head = self.snake.head_position();
        let ate = self.foods.consume_at(head);
        if ate {
            self.snake.grow();
            self.score.increment();
            let _ = self.foods.spawn_replacement(&mut self.rng, &self.config);
            debug!(
                "food eaten at ({}, {}), score {}",
                head.x,
                head.y,
                self.score.points()
            );
        }

        if self.config.expire_food {
            self.expire_food();
        }

        if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Advanced
        }
    }

    fn expire_food(&mut self) {
        let expired = self.foods.expire_tick();
        for _ in 0..expired {
            let _ = self.foods.spawn_replacement(&mut self.rng, &self.config);
        }
        if expired > 0 {
            debug!("{expired} food item(s) expired and respawned");
        }
    }

    /// Returns an owned snapshot for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            body: self.snake.segments().copied().collect(),
            food: self.foods.positions(),
            score: self.score.points(),
            status: self.status,
        }
    }

    #[must_use]
    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    #[must_use]
    pub fn foods(&self) -> &FoodPool {
        &self.foods
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score.points()
    }

    /// Returns what ended the session, if it has ended.
    #[must_use]
    pub fn death_cause(&self) -> Option<Collision> {
        self.death_cause
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
