//! Keyboard handling: detector tokens, shell actions and cursor movement.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_overlays::OverlayKind;
use folio_tictactoe::{GameMode, Position};

/// Volume change per key press.
pub const VOLUME_STEP: f32 = 0.1;

/// What a key press asks the shell to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Close the visible overlay.
    CloseOverlay,
    /// Flip light/dark.
    ToggleTheme,
    /// Show the logo banner.
    LogoClick,
    /// Open an overlay.
    Open(OverlayKind),
    /// Pause or resume the visible overlay's track.
    TogglePlayback,
    /// Mute or unmute the visible overlay's track.
    ToggleMute,
    /// Nudge the visible overlay's volume.
    Volume(f32),
    /// Choose who plays.
    SelectMode(GameMode),
    /// Clear the board, keep scores.
    NewRound,
    /// Back to mode selection, scores zeroed.
    ResetAll,
    /// Move the board cursor.
    MoveCursor(KeyCode),
    /// Place a mark under the cursor.
    PlaceAtCursor,
    /// Place a mark on a cell, 0-8.
    Place(usize),
}

/// Normalizes a key into the token the cheat-code detector watches.
///
/// Arrow keys use their DOM names (`ArrowUp`), printable keys are the
/// character itself. Keys without a sensible name produce nothing.
pub fn key_token(code: KeyCode) -> Option<String> {
    let token = match code {
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => return None,
    };
    Some(token)
}

/// Maps a key press to a shell action.
///
/// Board keys only apply while the game overlay has focus; everywhere else
/// arrows and digits are left to the detector.
pub fn action_for(key: KeyEvent, game_focused: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if game_focused {
        if let Some(action) = game_action(key.code) {
            return Some(action);
        }
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc => Some(Action::CloseOverlay),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('l') => Some(Action::LogoClick),
        KeyCode::Char('h') => Some(Action::Open(OverlayKind::Halloween)),
        KeyCode::Char('c') => Some(Action::Open(OverlayKind::Christmas)),
        KeyCode::Char('d') => Some(Action::Open(OverlayKind::Diwali)),
        KeyCode::Char('g') => Some(Action::Open(OverlayKind::TicTacToe)),
        KeyCode::Char('p') => Some(Action::TogglePlayback),
        KeyCode::Char('m') => Some(Action::ToggleMute),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Volume(VOLUME_STEP)),
        KeyCode::Char('-') => Some(Action::Volume(-VOLUME_STEP)),
        _ => None,
    }
}

fn game_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(Action::MoveCursor(code))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlaceAtCursor),
        KeyCode::Char(c @ '1'..='9') => Position::from_keypad(&c.to_string())
            .map(|pos| Action::Place(pos.to_index())),
        KeyCode::Char('v') => Some(Action::SelectMode(GameMode::HumanVsComputer)),
        KeyCode::Char('w') => Some(Action::SelectMode(GameMode::HumanVsHuman)),
        KeyCode::Char('n') => Some(Action::NewRound),
        KeyCode::Char('r') => Some(Action::ResetAll),
        _ => None,
    }
}

/// Moves cursor based on arrow keys.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}
