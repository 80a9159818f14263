use grid_snake::collision::Collision;
use grid_snake::config::GameConfig;
use grid_snake::food::{Food, FoodPool};
use grid_snake::game::{GameEngine, GameStatus, TickOutcome};
use grid_snake::input::Direction;
use grid_snake::snake::{GridPosition, SnakeBody};

fn engine_with(seed: u64, snake: SnakeBody, food: &[GridPosition]) -> GameEngine {
    let config = GameConfig::default();
    let mut pool = FoodPool::new(config.max_food_items);
    for position in food {
        assert!(pool.insert(Food::new(*position, config.food_lifetime)));
    }
    GameEngine::with_state(config, snake, pool, seed).expect("default config should be valid")
}

fn engine_with_food(seed: u64, food: &[GridPosition]) -> GameEngine {
    let config = GameConfig::default();
    engine_with(
        seed,
        SnakeBody::new(config.initial_head(), config.cell_size),
        food,
    )
}

#[test]
fn first_step_right_replaces_the_only_segment() {
    let mut engine = engine_with_food(1, &[]);
    assert_eq!(engine.snapshot().body, vec![GridPosition::new(400, 300)]);

    engine.request_direction(Direction::Right);
    engine.tick();

    assert_eq!(engine.snake().head_position(), GridPosition::new(420, 300));
    assert_eq!(engine.snapshot().body, vec![GridPosition::new(420, 300)]);
}

#[test]
fn eating_refills_pool_and_grows_one_tick_later() {
    let config = GameConfig::default();
    let mut engine = engine_with_food(
        42,
        &[
            GridPosition::new(420, 300),
            GridPosition::new(0, 0),
            GridPosition::new(0, 20),
        ],
    );

    engine.request_direction(Direction::Right);
    assert_eq!(engine.tick(), TickOutcome::Ate);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.food.len(), config.max_food_items);
    assert_eq!(snapshot.body.len(), 1);
    assert_eq!(engine.snake().target_length(), 2);

    engine.tick();
    assert_eq!(
        engine.snapshot().body,
        vec![GridPosition::new(420, 300), GridPosition::new(440, 300)]
    );
}

#[test]
fn leaving_the_left_edge_ends_the_session() {
    let mut engine = engine_with_food(3, &[]);
    engine.request_direction(Direction::Left);

    // 400 / 20 = 20 steps reach x = 0; the 21st leaves the field.
    for _ in 0..20 {
        assert_ne!(engine.tick(), TickOutcome::GameOver(Collision::OutOfBounds));
    }
    assert_eq!(engine.snake().head_position(), GridPosition::new(0, 300));
    assert_eq!(engine.status(), GameStatus::Running);

    assert_eq!(engine.tick(), TickOutcome::GameOver(Collision::OutOfBounds));
    assert_eq!(engine.snake().head_position(), GridPosition::new(-20, 300));
    assert_eq!(engine.tick(), TickOutcome::Halted);
}

#[test]
fn reversing_a_three_segment_body_hits_its_second_segment() {
    let mut engine = engine_with(
        4,
        SnakeBody::from_segments(
            vec![
                GridPosition::new(100, 100),
                GridPosition::new(120, 100),
                GridPosition::new(140, 100),
            ],
            Some(Direction::Right),
            20,
        ),
        &[],
    );

    engine.request_direction(Direction::Left);

    assert_eq!(
        engine.tick(),
        TickOutcome::GameOver(Collision::SelfIntersection)
    );
    assert_eq!(engine.snapshot().status, GameStatus::GameOver);
}

#[test]
fn score_never_decreases_over_a_long_random_walk() {
    let mut engine = GameEngine::new_with_seed(GameConfig::default(), 2024)
        .expect("default config should be valid");
    let turns = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Right,
    ];

    let mut last_score = engine.score();
    for step in 0..400 {
        if step % 5 == 0 {
            engine.request_direction(turns[(step / 5) % turns.len()]);
        }
        let before = engine.snake().target_length();
        let outcome = engine.tick();

        assert!(engine.score() >= last_score);
        assert!(engine.snake().len() <= engine.snake().target_length());
        if outcome == TickOutcome::Advanced {
            assert_eq!(engine.snake().target_length(), before);
        }
        last_score = engine.score();

        if engine.is_game_over() {
            break;
        }
    }
}

#[test]
fn food_under_a_resting_head_ends_the_session_on_the_next_tick() {
    let mut engine = engine_with_food(5, &[GridPosition::new(400, 300)]);

    assert_eq!(engine.tick(), TickOutcome::Ate);
    assert_eq!(engine.score(), 1);

    assert_eq!(
        engine.tick(),
        TickOutcome::GameOver(Collision::SelfIntersection)
    );
    assert!(engine.is_game_over());
    assert_eq!(engine.tick(), TickOutcome::Halted);
}
