//! Terminal UI rendering with ratatui
//!
//! Draws from a `GameView` only; nothing here mutates the session.

use crate::game::GameView;
use crate::grid::EMPTY;
use crate::settings::Settings;
use crate::tetromino::TetrominoType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY_CELL: &str = "  ";

/// Width of the next/stats column
const SIDE_WIDTH: u16 = 16;
/// Height of the next-piece box
const NEXT_HEIGHT: u16 = 6;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, view: &GameView<'_>, settings: &Settings) {
    let area = frame.area();
    let (block_char, _) = settings.visual.block_chars();

    let board_width = terminal_len(view.field.width()).saturating_mul(2).saturating_add(2);
    let board_height = terminal_len(view.field.height()).saturating_add(2);
    let game_area = center_rect(area, board_width + SIDE_WIDTH, board_height);

    // Create main layout: board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Length(SIDE_WIDTH)])
        .split(game_area);

    render_board(frame, main_layout[0], view, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(NEXT_HEIGHT), Constraint::Min(6)])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], view.next, block_char);
    render_stats(frame, right_layout[1], view);

    if view.game_over {
        render_overlay(frame, area, "GAME OVER", "Enter: new game  q: quit");
    }
}

/// Field dimension as a terminal length, saturating at `u16::MAX`
fn terminal_len(cells: usize) -> u16 {
    u16::try_from(cells).unwrap_or(u16::MAX)
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Color for a locked cell value
fn cell_color(cell: u8) -> Color {
    TetrominoType::from_cell(cell)
        .map(TetrominoType::color)
        .unwrap_or(Color::Gray)
}

/// Render the next piece preview
fn render_next(frame: &mut Frame, area: Rect, next: TetrominoType, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_mini_piece(frame, inner, next, block_char);
}

/// Render a small piece preview in its spawn orientation
fn render_mini_piece(frame: &mut Frame, area: Rect, piece_type: TetrominoType, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let color = piece_type.color();
    let cells: Vec<(i32, i32)> = piece_type.mask(0).cells().collect();

    // Find bounding box to normalize coordinates
    let max_y = cells.iter().map(|&(_, y)| y).max().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max_x = cells.iter().map(|&(x, _)| x).max().unwrap_or(0);

    // y increases upward but the screen renders top-to-bottom
    let lines: Vec<Line> = (min_y..=max_y)
        .rev()
        .map(|y| {
            let spans: Vec<Span> = (min_x..=max_x)
                .map(|x| {
                    if cells.contains(&(x, y)) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY_CELL)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the playing field with the active piece and its ghost
fn render_board(frame: &mut Frame, area: Rect, view: &GameView<'_>, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();
    let show_ghost = settings.visual.show_ghost;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field = view.field;
    let mut lines: Vec<Line> = Vec::with_capacity(field.height());

    // Render from top to bottom
    for y in (0..field.height() as i32).rev() {
        let mut spans = Vec::with_capacity(field.width());
        for x in 0..field.width() as i32 {
            let (text, style) = match &view.active {
                Some(active) if active.cells.contains(&(x, y)) => {
                    (block_char, Style::default().fg(cell_color(active.cell)))
                }
                Some(active) if show_ghost && active.ghost.contains(&(x, y)) => {
                    (ghost_char, Style::default().fg(cell_color(active.cell)).dim())
                }
                _ => match field.get(x, y) {
                    Ok(cell) if cell != EMPTY => (block_char, Style::default().fg(cell_color(cell))),
                    _ => (EMPTY_CELL, Style::default()),
                },
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, view: &GameView<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", view.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", view.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", view.lines),
            Style::default().fg(Color::Green),
        )),
        Line::raw(""),
        Line::from(Span::styled("PIECES", Style::default().fg(Color::Gray))),
        Line::from(Span::raw(format!("{}", view.pieces))),
    ];

    // Show last action if any
    if let Some(action) = view.last_action {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            action.to_string(),
            Style::default().fg(Color::Magenta).bold(),
        ));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// Render a centered message box over the game
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 28u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Command, Game, GameConfig};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_renders_stats_and_preview() {
        let game = Game::new(&config(), Instant::now());
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| render_game(frame, &game.view(), &settings))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("NEXT"));
        assert!(text.contains("SCORE"));
        assert!(text.contains("LEVEL"));
        assert!(!text.contains("GAME OVER"));
        // active piece plus ghost are on screen
        assert!(text.contains("██"));
        assert!(text.contains("░░"));
    }

    #[test]
    fn test_oversized_field_setting_renders() {
        let settings = Settings::parse("[field]\nwidth = 40000").unwrap();
        let game = Game::new(&settings.game_config(), Instant::now());
        assert_eq!(game.field().width(), 100);
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| render_game(frame, &game.view(), &settings))
            .unwrap();
    }

    #[test]
    fn test_terminal_len_saturates() {
        assert_eq!(terminal_len(10), 10);
        assert_eq!(terminal_len(40_000), 40_000);
        assert_eq!(terminal_len(1 << 20), u16::MAX);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut game = Game::new(&config(), Instant::now());
        let now = Instant::now();
        while !game.is_over() {
            game.handle_input(Command::HardDrop, now).unwrap();
        }
        let settings = Settings::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| render_game(frame, &game.view(), &settings))
            .unwrap();
        assert!(buffer_text(&terminal).contains("GAME OVER"));
    }
}
