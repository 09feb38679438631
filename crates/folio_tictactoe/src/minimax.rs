//! Exhaustive minimax search for the computer opponent.
//!
//! The searching side is the maximizer. Terminal positions score
//! `10 - depth` for a maximizer win, `depth - 10` for a minimizer win and `0`
//! for a tie, where `depth` counts plies below the position handed to
//! [`best_move`]. Faster wins and slower losses therefore score better.
//!
//! There is no pruning and no transposition table. The full game tree is
//! under 9! positions, which searches in milliseconds.

use crate::rules::Outcome;
use crate::{Board, Player, Position, Square};
use tracing::{debug, instrument};

/// Score of a maximizer win found at depth 0.
const WIN_SCORE: i32 = 10;

/// Picks the move with the strictly greatest minimax score for `me`.
///
/// Moves are tried in index order 0..8 and the first one to reach the best
/// score is kept. Returns `None` when the board is already decided or full.
#[instrument(skip(board), fields(board = %board.display().replace('\n', " ")))]
pub fn best_move(board: &Board, me: Player) -> Option<Position> {
    if Outcome::of(board).is_terminal() {
        return None;
    }

    let mut best: Option<(Position, i32)> = None;
    for pos in Position::valid_moves(board) {
        let mut child = *board;
        child.set(pos, Square::Occupied(me));
        let score = minimax(&child, 0, false, me);
        debug!(position = %pos, score, "Scored candidate move");
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    debug!(chosen = ?best, "Search complete");
    best.map(|(pos, _)| pos)
}

/// Scores `board` for `me`, with `maximizing` telling whose ply it is.
pub fn minimax(board: &Board, depth: i32, maximizing: bool, me: Player) -> i32 {
    match Outcome::of(board) {
        Outcome::Won(winner) if winner == me => return WIN_SCORE - depth,
        Outcome::Won(_) => return depth - WIN_SCORE,
        Outcome::Tie => return 0,
        Outcome::InProgress => {}
    }

    let mover = if maximizing { me } else { me.opponent() };
    let scores = Position::valid_moves(board).into_iter().map(|pos| {
        let mut child = *board;
        child.set(pos, Square::Occupied(mover));
        minimax(&child, depth + 1, !maximizing, me)
    });

    let best = if maximizing { scores.max() } else { scores.min() };
    // InProgress guarantees at least one empty square.
    best.unwrap_or(0)
}
