//! What the engine reports back to its caller.
//!
//! Illegal input is not an error here. A rejected move leaves every piece of
//! engine state untouched and comes back as [`Placement::Ignored`] so the
//! shell can log it or show a hint.

use crate::rules::Outcome;
use crate::{Player, Position};
use serde::{Deserialize, Serialize};

/// Result of offering a move to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The mark was placed; carries the outcome after the move.
    Accepted(Outcome),
    /// The move was dropped without touching any state.
    Ignored(IgnoreReason),
}

impl Placement {
    /// True if the move changed the board.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Placement::Accepted(_))
    }
}

/// Why a move was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IgnoreReason {
    /// Cell index outside 0-8.
    #[display("Cell {} is not on the board", _0)]
    OutOfRange(usize),

    /// No game mode chosen yet.
    #[display("Pick a game mode first")]
    NoModeSelected,

    /// The round already has a winner or is tied.
    #[display("Round is over")]
    RoundOver,

    /// The computer is resolving its move.
    #[display("Computer is thinking")]
    ComputerThinking,

    /// The computer owns the turn.
    #[display("It's {}'s turn", _0)]
    NotYourTurn(Player),

    /// The square already holds a mark.
    #[display("{} is already taken", _0)]
    SquareOccupied(Position),
}

/// Progress of the computer's turn, reported from
/// [`GameEngine::poll`](crate::GameEngine::poll).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The trigger delay elapsed; the thinking flag is now set.
    ComputerThinking,
    /// The computer placed its mark.
    ComputerMoved(Position),
    /// The computer's move ended the round.
    RoundOver(Outcome),
}
