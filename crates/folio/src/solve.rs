//! One-shot evaluation of a board from the command line.

use anyhow::{Result, bail};
use folio_tictactoe::{Board, Outcome, Player, Position, Square, best_move, minimax};
use serde::Serialize;
use tracing::{info, instrument};

/// What the engine makes of a position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    /// The board as given, one row per line.
    pub board: String,
    /// Side whose turn it is.
    pub to_move: Player,
    /// Outcome of the position as given.
    pub outcome: Outcome,
    /// The engine's reply, if the game is still on.
    pub best_move: Option<Position>,
    /// Minimax score of that reply for the side to move.
    pub score: Option<i32>,
}

impl std::fmt::Display for SolveReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        match (self.best_move, self.score) {
            (Some(pos), Some(score)) => write!(
                f,
                "{} to move: play {} (cell {}), score {}",
                self.to_move,
                pos.label(),
                pos.to_index() + 1,
                score
            ),
            _ => write!(f, "No move: {}", self.outcome),
        }
    }
}

/// Parses `input` and asks the engine for the side to move's best reply.
#[instrument]
pub fn solve(input: &str) -> Result<SolveReport> {
    let Some(board) = Board::parse(input) else {
        bail!("Expected nine cells of X, O or '.', got {:?}", input);
    };

    let (xs, os) = (board.count(Player::X), board.count(Player::O));
    if xs < os || xs > os + 1 {
        bail!("Impossible position: {} X marks against {} O marks", xs, os);
    }

    let to_move = board.side_to_move();
    let best = best_move(&board, to_move);
    let score = best.map(|pos| {
        let mut child = board;
        child.set(pos, Square::Occupied(to_move));
        minimax(&child, 0, false, to_move)
    });

    info!(%to_move, ?best, ?score, "Position solved");
    Ok(SolveReport {
        board: board.display(),
        to_move,
        outcome: Outcome::of(&board),
        best_move: best,
        score,
    })
}
