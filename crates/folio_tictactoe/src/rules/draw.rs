//! Tie detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::{Board, Square};

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A tie is a full board on which no line is won.
pub fn is_tie(board: &Board) -> bool {
    check_winner(board).is_none() && is_full(board)
}
