//! Outcome of a position, derived from the board alone.

use super::{check_winner, is_full};
use crate::{Board, Player};
use serde::{Deserialize, Serialize};

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Moves remain and nobody has a line.
    InProgress,
    /// The player holds a complete line.
    Won(Player),
    /// Full board, no line.
    Tie,
}

impl Outcome {
    /// Classifies a board. Wins are checked strictly before the tie.
    pub fn of(board: &Board) -> Self {
        if let Some(winner) = check_winner(board) {
            Outcome::Won(winner)
        } else if is_full(board) {
            Outcome::Tie
        } else {
            Outcome::InProgress
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(*player),
            _ => None,
        }
    }

    /// True once the round can take no more moves.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Won(player) => write!(f, "Player {} wins", player),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_on_last_square_beats_tie() {
        // X fills the final square and completes the left column.
        let board = Board::parse("XOX XOO XXO").expect("valid board");
        assert_eq!(Outcome::of(&board), Outcome::Won(Player::X));
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let board = Board::parse("XOX XOO OXX").expect("valid board");
        assert_eq!(Outcome::of(&board), Outcome::Tie);
        assert!(Outcome::Tie.is_terminal());
    }

    #[test]
    fn test_open_board_in_progress() {
        assert_eq!(Outcome::of(&Board::new()), Outcome::InProgress);
        assert_eq!(Outcome::InProgress.winner(), None);
    }
}
