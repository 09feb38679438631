//! Stateless UI rendering.

use crate::app::{App, game_status};
use crate::preferences::Theme;
use folio_overlays::{ActiveOverlay, OverlayKind};
use folio_tictactoe::{Board, GameEngine, Player, Position, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const HELP: &str = "h/c/d seasonal · g game · t theme · l logo · p play/pause · m mute · +/- volume · Esc close · q quit";

#[derive(Debug, Clone, Copy)]
struct Palette {
    bg: Color,
    fg: Color,
    dim: Color,
    highlight: Color,
}

fn palette(theme: Theme, accent: Option<Color>) -> Palette {
    let base = match theme {
        Theme::Dark => Palette {
            bg: Color::Black,
            fg: Color::White,
            dim: Color::DarkGray,
            highlight: Color::Magenta,
        },
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            highlight: Color::Rgb(0xF9, 0x73, 0x16),
        },
    };
    Palette {
        bg: accent.unwrap_or(base.bg),
        ..base
    }
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = palette(app.theme(), app.accent());

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg).fg(colors.fg)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Body
            Constraint::Length(3), // Status
        ])
        .split(area);

    draw_header(frame, chunks[0], app, colors);
    draw_body(frame, chunks[1], app, colors);
    draw_status(frame, chunks[2], app, colors);

    if let Some(overlay) = app.visible() {
        draw_overlay(frame, chunks[1], app, overlay, colors);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, colors: Palette) {
    let mut spans = vec![
        Span::styled(
            "⚔ folio",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(app.theme().label(), Style::default().fg(colors.dim)),
    ];
    if app.cheat_active() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "★ CHEAT MODE",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(banner) = app.logo_banner() {
        lines.push(Line::from(Span::styled(banner, Style::default().fg(Color::Green))));
    }

    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_body(frame: &mut Frame, area: Rect, app: &App, colors: Palette) {
    let scores = app.engine().scores();
    let text = vec![
        Line::from("Welcome, traveler."),
        Line::from(""),
        Line::from(Span::styled(
            "Some things here only open for those who remember the old codes.",
            Style::default().fg(colors.dim),
        )),
        Line::from(""),
        Line::from(format!(
            "Session record  X {} · O {} · ties {} · best streak {}",
            scores.x_wins(),
            scores.o_wins(),
            scores.ties(),
            scores.max_streak()
        )),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, center_rect(area, area.width, 7));
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, colors: Palette) {
    let status = if app.status().is_empty() {
        HELP
    } else {
        app.status()
    };
    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.dim)),
        );
    frame.render_widget(status_text, area);
}

fn overlay_title(kind: OverlayKind) -> &'static str {
    match kind {
        OverlayKind::Halloween => " 🎃 Happy Halloween ",
        OverlayKind::Christmas => " 🎄 Merry Christmas ",
        OverlayKind::Diwali => " 🪔 Happy Diwali ",
        OverlayKind::CheatCode => " 🎉 CHEAT CODE ACTIVATED ",
        OverlayKind::TicTacToe => " 👻 Spooky Tic-Tac-Toe ",
    }
}

fn draw_overlay(frame: &mut Frame, area: Rect, app: &App, overlay: &ActiveOverlay, colors: Palette) {
    let height = if overlay.kind() == OverlayKind::TicTacToe { 22 } else { 9 };
    let popup = center_rect(area, 60.min(area.width), height.min(area.height));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(overlay_title(overlay.kind()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg).fg(colors.fg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    if overlay.kind() == OverlayKind::TicTacToe {
        draw_game(frame, inner, app.engine(), app.cursor());
        return;
    }

    let mut lines = Vec::new();
    if let Some(message) = overlay.message() {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    if let Some(audio) = overlay.audio() {
        let playback = if audio.paused { "⏸ paused" } else { "▶ playing" };
        let sound = if audio.muted {
            "🔇 muted".to_string()
        } else {
            format!("🔊 {:.0}%", audio.volume * 100.0)
        };
        let track = app
            .overlays()
            .audio_sink()
            .track(overlay.kind())
            .unwrap_or("-");
        lines.push(Line::from(format!("♪ {}  {}  {}", track, playback, sound)));
    }
    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(colors.dim),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn draw_game(frame: &mut Frame, area: Rect, engine: &GameEngine, cursor: Position) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Scores
            Constraint::Min(11),    // Board
            Constraint::Length(2),  // Game status
        ])
        .split(area);

    let scores = engine.scores();
    let score_line = format!(
        "You {} · Computer {} · Ties {} · Streak {} (best {})",
        scores.wins(Player::X),
        scores.wins(Player::O),
        scores.ties(),
        scores.streak(),
        scores.max_streak()
    );
    frame.render_widget(
        Paragraph::new(score_line).alignment(Alignment::Center),
        chunks[0],
    );

    draw_board(frame, chunks[1], engine.board(), cursor);

    frame.render_widget(
        Paragraph::new(game_status(engine))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        chunks[2],
    );
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Position) {
    let board_area = center_rect(area, 38, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, cells) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], board, cursor, cells);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, positions: &[Position]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (i, pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[i * 2], board, cursor, *pos);
        if i < 2 {
            frame.render_widget(
                Paragraph::new("│").style(Style::default().fg(Color::DarkGray)),
                cols[i * 2 + 1],
            );
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: Position, pos: Position) {
    let (symbol, base_style) = match board.get(pos) {
        Square::Empty => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            " 🎃 ".to_string(),
            Style::default().fg(Color::Rgb(0xFF, 0x8C, 0x00)).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " 👻 ".to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if pos == cursor {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(symbol, style)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("────────────┼────────────┼────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

/// A `width` × `height` rectangle centered in `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
