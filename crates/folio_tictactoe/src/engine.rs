//! Session state machine for the tic-tac-toe overlay.
//!
//! The engine is driven by discrete calls and an explicit clock. Nothing in
//! here sleeps: the computer's turn is a pair of scheduled steps held in a
//! single timer slot, and the caller fires them with [`GameEngine::poll`].
//!
//! ```text
//! human move ─► Trigger (600 ms) ─► thinking=true ─► Resolve (500 ms) ─► computer move
//! ```

use crate::events::{EngineEvent, IgnoreReason, Placement};
use crate::minimax::best_move;
use crate::rules::Outcome;
use crate::score::ScoreState;
use crate::{Board, GameMode, Player, Position, Square};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

/// Side played by the human in [`GameMode::HumanVsComputer`].
pub const HUMAN: Player = Player::X;

/// Side played by the computer in [`GameMode::HumanVsComputer`].
pub const COMPUTER: Player = Player::O;

/// Delays around the computer's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTiming {
    /// From the human's move until the computer starts thinking.
    pub trigger: Duration,
    /// From the start of thinking until the move lands.
    pub resolution: Duration,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self {
            trigger: Duration::from_millis(600),
            resolution: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComputerStep {
    Trigger,
    Resolve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledStep {
    due: Instant,
    step: ComputerStep,
}

/// Tic-tac-toe session: board, mode, scores and the computer's turn.
///
/// The side to move is derived from the board (`X` always opens), and the
/// outcome is recomputed from the board on every call, so neither can drift
/// out of sync with the squares.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    mode: GameMode,
    scores: ScoreState,
    thinking: bool,
    pending: Option<ScheduledStep>,
    timing: EngineTiming,
}

impl GameEngine {
    /// Creates an engine with no mode selected and default timing.
    #[instrument]
    pub fn new() -> Self {
        Self::with_timing(EngineTiming::default())
    }

    /// Creates an engine with custom computer delays.
    #[instrument]
    pub fn with_timing(timing: EngineTiming) -> Self {
        Self {
            board: Board::new(),
            mode: GameMode::Unselected,
            scores: ScoreState::new(),
            thinking: false,
            pending: None,
            timing,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The selected mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Session scores.
    pub fn scores(&self) -> &ScoreState {
        &self.scores
    }

    /// True while the computer is resolving its move.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Side whose mark goes down next.
    pub fn to_move(&self) -> Player {
        self.board.side_to_move()
    }

    /// Current outcome, derived from the board.
    pub fn outcome(&self) -> Outcome {
        Outcome::of(&self.board)
    }

    /// True when the computer owns the turn of a live round.
    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::HumanVsComputer
            && self.to_move() == COMPUTER
            && !self.outcome().is_terminal()
    }

    /// When the pending computer step is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Starts a new session in `mode`.
    ///
    /// Always a full reset: board, scores, streaks, the thinking flag and any
    /// pending computer step are cleared, even mid-round. Selecting
    /// [`GameMode::Unselected`] is the same as [`GameEngine::reset_all`].
    #[instrument(skip(self), fields(previous = %self.mode))]
    pub fn select_mode(&mut self, mode: GameMode) {
        self.board = Board::new();
        self.scores = ScoreState::new();
        self.thinking = false;
        self.pending = None;
        self.mode = mode;
        info!(%mode, "Game mode selected");
    }

    /// Clears the board for another round, keeping scores.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn new_round(&mut self) {
        self.board = Board::new();
        self.thinking = false;
        self.pending = None;
        debug!("New round");
    }

    /// Back to the mode menu with everything zeroed.
    #[instrument(skip(self))]
    pub fn reset_all(&mut self) {
        self.select_mode(GameMode::Unselected);
    }

    /// Offers a human move at `cell` (0-8).
    ///
    /// Rejected moves change nothing and report why. An accepted move in
    /// HumanVsComputer schedules the computer's reply relative to `now`.
    #[instrument(skip(self), fields(mode = %self.mode, to_move = %self.to_move()))]
    pub fn player_move(&mut self, cell: usize, now: Instant) -> Placement {
        let pos = match self.check_move(cell) {
            Ok(pos) => pos,
            Err(reason) => {
                debug!(%reason, "Move ignored");
                return Placement::Ignored(reason);
            }
        };

        let mover = self.to_move();
        let outcome = self.place(pos, mover);
        debug!(%pos, %mover, %outcome, "Move accepted");

        if self.is_computer_turn() {
            self.schedule(ComputerStep::Trigger, now + self.timing.trigger);
        }

        Placement::Accepted(outcome)
    }

    /// Fires every computer step due at `now`.
    ///
    /// If the clock jumped past both the trigger and the resolution, both run
    /// in order within this call.
    #[instrument(skip(self))]
    pub fn poll(&mut self, now: Instant) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        while let Some(scheduled) = self.pending.filter(|p| p.due <= now) {
            self.pending = None;
            match scheduled.step {
                ComputerStep::Trigger => {
                    if !self.is_computer_turn() || self.thinking {
                        continue;
                    }
                    self.thinking = true;
                    self.schedule(ComputerStep::Resolve, scheduled.due + self.timing.resolution);
                    events.push(EngineEvent::ComputerThinking);
                }
                ComputerStep::Resolve => {
                    self.thinking = false;
                    if !self.is_computer_turn() {
                        debug!("Round ended before the computer could move");
                        continue;
                    }
                    if let Some(pos) = best_move(&self.board, COMPUTER) {
                        let outcome = self.place(pos, COMPUTER);
                        info!(%pos, %outcome, "Computer moved");
                        events.push(EngineEvent::ComputerMoved(pos));
                        if outcome.is_terminal() {
                            events.push(EngineEvent::RoundOver(outcome));
                        }
                    }
                }
            }
        }

        events
    }

    fn check_move(&self, cell: usize) -> Result<Position, IgnoreReason> {
        let pos = Position::from_index(cell).ok_or(IgnoreReason::OutOfRange(cell))?;
        if self.mode == GameMode::Unselected {
            return Err(IgnoreReason::NoModeSelected);
        }
        if self.outcome().is_terminal() {
            return Err(IgnoreReason::RoundOver);
        }
        if self.thinking {
            return Err(IgnoreReason::ComputerThinking);
        }
        if self.is_computer_turn() {
            return Err(IgnoreReason::NotYourTurn(COMPUTER));
        }
        if !self.board.is_empty(pos) {
            return Err(IgnoreReason::SquareOccupied(pos));
        }
        Ok(pos)
    }

    fn place(&mut self, pos: Position, player: Player) -> Outcome {
        self.board.set(pos, Square::Occupied(player));
        let outcome = self.outcome();
        self.scores.record(outcome, self.mode);
        outcome
    }

    fn schedule(&mut self, step: ComputerStep, due: Instant) {
        if let Some(previous) = self.pending.replace(ScheduledStep { due, step }) {
            debug!(?previous, "Replaced pending computer step");
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unselected_engine_ignores_moves() {
        let mut engine = GameEngine::new();
        let placement = engine.player_move(4, Instant::now());
        assert_eq!(placement, Placement::Ignored(IgnoreReason::NoModeSelected));
        assert_eq!(engine.board(), &Board::new());
    }

    #[test]
    fn test_out_of_range_cell_ignored() {
        let mut engine = GameEngine::new();
        engine.select_mode(GameMode::HumanVsHuman);
        assert_eq!(
            engine.player_move(9, Instant::now()),
            Placement::Ignored(IgnoreReason::OutOfRange(9))
        );
    }

    #[test]
    fn test_humans_alternate_marks() {
        let now = Instant::now();
        let mut engine = GameEngine::new();
        engine.select_mode(GameMode::HumanVsHuman);

        assert!(engine.player_move(0, now).is_accepted());
        assert_eq!(engine.to_move(), Player::O);
        assert!(engine.player_move(4, now).is_accepted());
        assert_eq!(engine.board().get(Position::TopLeft), Square::Occupied(Player::X));
        assert_eq!(engine.board().get(Position::Center), Square::Occupied(Player::O));
        assert_eq!(engine.next_deadline(), None);
    }

    #[test]
    fn test_computer_turn_is_scheduled_not_immediate() {
        let now = Instant::now();
        let mut engine = GameEngine::new();
        engine.select_mode(GameMode::HumanVsComputer);

        assert!(engine.player_move(0, now).is_accepted());
        assert!(engine.is_computer_turn());
        assert!(!engine.is_thinking());
        assert_eq!(engine.next_deadline(), Some(now + Duration::from_millis(600)));

        assert!(engine.poll(now + Duration::from_millis(599)).is_empty());
        assert_eq!(
            engine.poll(now + Duration::from_millis(600)),
            vec![EngineEvent::ComputerThinking]
        );
        assert!(engine.is_thinking());
        assert_eq!(
            engine.player_move(1, now + Duration::from_millis(700)),
            Placement::Ignored(IgnoreReason::ComputerThinking)
        );

        let events = engine.poll(now + Duration::from_millis(1100));
        assert_eq!(events, vec![EngineEvent::ComputerMoved(Position::Center)]);
        assert!(!engine.is_thinking());
        assert_eq!(engine.to_move(), HUMAN);
        assert_eq!(engine.next_deadline(), None);
    }

    #[test]
    fn test_clock_jump_runs_both_steps() {
        let now = Instant::now();
        let mut engine = GameEngine::new();
        engine.select_mode(GameMode::HumanVsComputer);
        engine.player_move(4, now);

        let events = engine.poll(now + Duration::from_secs(5));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], EngineEvent::ComputerThinking);
        assert!(matches!(events[1], EngineEvent::ComputerMoved(_)));
    }

    #[test]
    fn test_new_round_cancels_pending_computer_step() {
        let now = Instant::now();
        let mut engine = GameEngine::new();
        engine.select_mode(GameMode::HumanVsComputer);
        engine.player_move(0, now);
        engine.new_round();

        assert_eq!(engine.next_deadline(), None);
        assert!(engine.poll(now + Duration::from_secs(5)).is_empty());
        assert_eq!(engine.board(), &Board::new());
    }
}
