//! Score and streak bookkeeping across rounds.

use crate::rules::Outcome;
use crate::{GameMode, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Running totals for a session.
///
/// Streaks only move in [`GameMode::HumanVsComputer`], where they count
/// consecutive human (`X`) wins. A computer win or a tie resets the current
/// streak; the best streak is kept until the session is reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    x_wins: u32,
    o_wins: u32,
    ties: u32,
    streak: u32,
    max_streak: u32,
}

impl ScoreState {
    /// Zeroed scores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wins for `X` (the human in HumanVsComputer).
    pub fn x_wins(&self) -> u32 {
        self.x_wins
    }

    /// Wins for `O` (the computer in HumanVsComputer).
    pub fn o_wins(&self) -> u32 {
        self.o_wins
    }

    /// Wins for the given side.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Tied rounds.
    pub fn ties(&self) -> u32 {
        self.ties
    }

    /// Consecutive human wins against the computer.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Longest streak seen this session.
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    /// Records a finished round. `InProgress` is ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome, mode: GameMode) {
        let tracks_streak = mode == GameMode::HumanVsComputer;
        match outcome {
            Outcome::InProgress => return,
            Outcome::Won(Player::X) => {
                self.x_wins += 1;
                if tracks_streak {
                    self.streak += 1;
                    self.max_streak = self.max_streak.max(self.streak);
                }
            }
            Outcome::Won(Player::O) => {
                self.o_wins += 1;
                if tracks_streak {
                    self.streak = 0;
                }
            }
            Outcome::Tie => {
                self.ties += 1;
                if tracks_streak {
                    self.streak = 0;
                }
            }
        }
        debug!(scores = ?self, "Recorded round");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_counts_consecutive_human_wins() {
        let mut scores = ScoreState::new();
        for _ in 0..3 {
            scores.record(Outcome::Won(Player::X), GameMode::HumanVsComputer);
        }
        assert_eq!(scores.streak(), 3);
        assert_eq!(scores.max_streak(), 3);

        scores.record(Outcome::Tie, GameMode::HumanVsComputer);
        assert_eq!(scores.streak(), 0);
        assert_eq!(scores.max_streak(), 3);

        scores.record(Outcome::Won(Player::X), GameMode::HumanVsComputer);
        assert_eq!(scores.streak(), 1);
        assert_eq!(scores.max_streak(), 3);
        assert_eq!(scores.x_wins(), 4);
        assert_eq!(scores.ties(), 1);
    }

    #[test]
    fn test_streak_ignored_between_humans() {
        let mut scores = ScoreState::new();
        scores.record(Outcome::Won(Player::X), GameMode::HumanVsHuman);
        scores.record(Outcome::Won(Player::O), GameMode::HumanVsHuman);
        assert_eq!(scores.wins(Player::X), 1);
        assert_eq!(scores.wins(Player::O), 1);
        assert_eq!(scores.streak(), 0);
        assert_eq!(scores.max_streak(), 0);
    }

    #[test]
    fn test_in_progress_records_nothing() {
        let mut scores = ScoreState::new();
        scores.record(Outcome::InProgress, GameMode::HumanVsComputer);
        assert_eq!(scores, ScoreState::new());
    }
}
