use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{
    BG_COLOR, FOOD_COLOR, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GameConfig,
    SNAKE_COLOR, TERMINAL_COLUMNS_PER_CELL, TEXT_COLOR,
};
use crate::game::GameSnapshot;
use crate::snake::GridPosition;

/// Renders one frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &GameSnapshot, config: &GameConfig) {
    let [score_area, field_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(format!("Score: {}", snapshot.score)))
            .style(Style::new().fg(TEXT_COLOR)),
        score_area,
    );

    let play_area = playfield_rect(field_area, config);
    let block = Block::bordered().style(Style::new().fg(TEXT_COLOR).bg(BG_COLOR));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, snapshot, config);
    render_snake(frame, inner, snapshot, config);
}

/// Returns the bordered playfield rectangle, clipped to `area`.
fn playfield_rect(area: Rect, config: &GameConfig) -> Rect {
    let width = config
        .columns()
        .saturating_mul(TERMINAL_COLUMNS_PER_CELL)
        .saturating_add(2);
    let height = config.rows().saturating_add(2);

    Rect {
        x: area.x,
        y: area.y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, config: &GameConfig) {
    let buffer = frame.buffer_mut();
    for position in &snapshot.food {
        let Some((x, y)) = grid_to_terminal(inner, config.cell_size, *position) else {
            continue;
        };
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(FOOD_COLOR).bg(BG_COLOR));
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &GameSnapshot, config: &GameConfig) {
    let head = snapshot.head();

    let buffer = frame.buffer_mut();
    for segment in &snapshot.body {
        let Some((x, y)) = grid_to_terminal(inner, config.cell_size, *segment) else {
            continue;
        };

        if Some(*segment) == head {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(SNAKE_COLOR)
                    .bg(BG_COLOR)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        buffer.set_string(
            x,
            y,
            GLYPH_SNAKE_BODY,
            Style::new().fg(SNAKE_COLOR).bg(BG_COLOR),
        );
    }
}

/// Maps a playfield position to the top-left terminal cell that draws it.
///
/// Returns `None` for positions outside the field or outside `inner`, which
/// happens on the game-over frame and on terminals smaller than the field.
fn grid_to_terminal(inner: Rect, cell_size: u16, position: GridPosition) -> Option<(u16, u16)> {
    if cell_size == 0 || position.x < 0 || position.y < 0 {
        return None;
    }

    let column = u16::try_from(position.x / i32::from(cell_size)).ok()?;
    let row = u16::try_from(position.y / i32::from(cell_size)).ok()?;

    let x = inner
        .x
        .saturating_add(column.saturating_mul(TERMINAL_COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(TERMINAL_COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::config::{GLYPH_FOOD, GLYPH_SNAKE_HEAD, GameConfig};
    use crate::game::{GameSnapshot, GameStatus};
    use crate::snake::GridPosition;

    use super::{grid_to_terminal, render};

    fn first_glyph(glyphs: &str) -> String {
        glyphs.chars().take(1).collect()
    }

    fn small_config() -> GameConfig {
        GameConfig {
            width: 100,
            height: 60,
            cell_size: 20,
            ..GameConfig::default()
        }
    }

    #[test]
    fn grid_positions_map_to_double_width_cells() {
        let inner = Rect::new(1, 2, 10, 3);

        assert_eq!(grid_to_terminal(inner, 20, GridPosition::new(0, 0)), Some((1, 2)));
        assert_eq!(grid_to_terminal(inner, 20, GridPosition::new(80, 40)), Some((9, 4)));
        assert_eq!(grid_to_terminal(inner, 20, GridPosition::new(100, 0)), None);
        assert_eq!(grid_to_terminal(inner, 20, GridPosition::new(-20, 0)), None);
        assert_eq!(grid_to_terminal(inner, 20, GridPosition::new(0, 60)), None);
    }

    #[test]
    fn frame_shows_score_head_and_food() {
        let config = small_config();
        let snapshot = GameSnapshot {
            body: vec![GridPosition::new(20, 20), GridPosition::new(40, 20)],
            food: vec![GridPosition::new(80, 40)],
            score: 7,
            status: GameStatus::Running,
        };
        let mut terminal =
            Terminal::new(TestBackend::new(20, 8)).expect("test terminal should build");

        terminal
            .draw(|frame| render(frame, &snapshot, &config))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        let score_row: String = (0..8_u16)
            .filter_map(|x| buffer.cell((x, 0_u16)).map(|cell| cell.symbol().to_owned()))
            .collect();
        assert_eq!(score_row, "Score: 7");

        // Field border starts on row 1, so the inner origin is (1, 2).
        let head = buffer.cell((5_u16, 3_u16)).expect("head cell should exist");
        assert_eq!(head.symbol(), first_glyph(GLYPH_SNAKE_HEAD));
        let food = buffer.cell((9_u16, 4_u16)).expect("food cell should exist");
        assert_eq!(food.symbol(), first_glyph(GLYPH_FOOD));
    }
}
