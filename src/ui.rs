#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::app::App;
use crate::components::{PieceColor, Position};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

// Each cell is 2 characters wide and 1 tall to look roughly square
const CELL_WIDTH: u16 = 2;
const BOARD_PANEL_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
const BOARD_PANEL_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;
const MIN_INFO_WIDTH: u16 = 24;

const LOCKED_COLOR: Color = Color::Rgb(100, 100, 150);
const GRID_COLOR: Color = Color::Rgb(50, 50, 70);

impl From<PieceColor> for Color {
    fn from(color: PieceColor) -> Self {
        Color::Rgb(color.r, color.g, color.b)
    }
}

/// Smallest terminal the game can be drawn in.
#[must_use]
pub fn minimum_size() -> (u16, u16) {
    (BOARD_PANEL_WIDTH + MIN_INFO_WIDTH, BOARD_PANEL_HEIGHT + 3)
}

pub fn render(f: &mut Frame, app: &App) {
    let (min_width, min_height) = minimum_size();
    if f.area().width < min_width || f.area().height < min_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("blockfall"));

        let warning_area = centered_rect(80, 50, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BOARD_PANEL_HEIGHT + 2), // Title and board
            Constraint::Length(1),                      // Status line
            Constraint::Min(0),
        ])
        .split(f.area());

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_PANEL_WIDTH),
            Constraint::Min(MIN_INFO_WIDTH),
        ])
        .split(outer[0]);

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                  // Title
            Constraint::Length(BOARD_PANEL_HEIGHT), // Game board
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("BLOCKFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);
    render_info(f, app, main_layout[1]);

    let status = Paragraph::new(app.status.message()).style(Style::default().fg(Color::Gray));
    f.render_widget(status, outer[1]);
}

fn render_info(f: &mut Frame, app: &App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Score, level, lines
            Constraint::Length(6), // Next piece
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let stats = vec![
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(app.hud.score.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::raw("Level: "),
            Span::styled(app.hud.level.to_string(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::raw("Lines: "),
            Span::styled(app.hud.lines.to_string(), Style::default().fg(Color::Cyan)),
        ]),
    ];
    f.render_widget(Paragraph::new(stats), info_layout[1]);

    render_next_tetromino(f, app, info_layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→ h/l: Move\n\
        ↓ j: Soft drop\n\
        ↑ k: Rotate\n\
        Space: Hard drop\n\
        Ctrl+S/P: Start/Pause\n\
        Ctrl+R: Reset  Q: Quit",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[3]);
}

pub fn render_next_tetromino(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::TOP).title("Next");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let color = Color::from(app.engine.next_piece_color());
    for (dx, dy) in app.engine.next_piece_blocks() {
        let x = inner.left() + 1 + dx as u16 * CELL_WIDTH;
        let y = inner.top() + dy as u16;
        paint_cell(f, x, y, inner, "██", color);
    }
}

fn render_game_board(f: &mut Frame, app: &App, area: Rect) {
    let board_block = Block::default().borders(Borders::ALL);
    let inner_area = board_block.inner(area);
    f.render_widget(board_block, area);

    let to_screen = |x: i32, y: i32| -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((
            inner_area.left() + x as u16 * CELL_WIDTH,
            inner_area.top() + y as u16,
        ))
    };

    for (y, row) in app.engine.board().rows().iter().enumerate() {
        for (x, &occupied) in row.iter().enumerate() {
            let Some((sx, sy)) = to_screen(x as i32, y as i32) else {
                continue;
            };
            if occupied {
                paint_cell(f, sx, sy, inner_area, "██", LOCKED_COLOR);
            } else if app.config.display.show_grid {
                paint_cell(f, sx, sy, inner_area, "· ", GRID_COLOR);
            }
        }
    }

    if let (Some(piece), Some(shadow)) = (app.engine.active_piece(), app.engine.shadow_position())
    {
        let color = Color::from(piece.color);

        if app.config.display.show_ghost && shadow != piece.position {
            for (dx, dy) in piece.tetromino.get_blocks() {
                let cell = Position {
                    x: shadow.x + dx,
                    y: shadow.y + dy,
                };
                if let Some((sx, sy)) = to_screen(cell.x, cell.y) {
                    paint_cell(f, sx, sy, inner_area, "░░", color);
                }
            }
        }

        for cell in piece.cells() {
            if let Some((sx, sy)) = to_screen(cell.x, cell.y) {
                paint_cell(f, sx, sy, inner_area, "██", color);
            }
        }
    }

    let overlay = if app.engine.is_game_over() {
        Some(("GAME OVER", Color::Red))
    } else if app.engine.is_paused() {
        Some(("PAUSED", Color::Yellow))
    } else {
        None
    };

    if let Some((text, color)) = overlay {
        let banner = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        let banner_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 1,
        };
        f.render_widget(banner, banner_area);
    }
}

fn paint_cell(f: &mut Frame, x: u16, y: u16, clip: Rect, symbol: &str, color: Color) {
    for (i, ch) in symbol.chars().enumerate() {
        let cx = x + i as u16;
        if cx >= clip.right() || y >= clip.bottom() {
            continue;
        }
        if let Some(cell) = f.buffer_mut().cell_mut((cx, y)) {
            cell.set_char(ch);
            cell.set_fg(color);
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
