//! Tic-tac-toe for the portfolio's hidden game overlay.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Square`], [`Player`], [`Position`], [`GameMode`]
//! - **Rules**: pure win/tie detection, [`Outcome`] derived from a board
//! - **Search**: [`best_move`], an exhaustive minimax opponent that never loses
//! - **Engine**: [`GameEngine`], the session state machine with scores,
//!   streaks and a timed computer turn
//!
//! # Example
//!
//! ```
//! use folio_tictactoe::{GameEngine, GameMode, EngineEvent};
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut engine = GameEngine::new();
//! engine.select_mode(GameMode::HumanVsComputer);
//! assert!(engine.player_move(0, start).is_accepted());
//!
//! let events = engine.poll(start + Duration::from_secs(2));
//! assert!(events.contains(&EngineEvent::ComputerThinking));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod events;
mod minimax;
mod position;
pub mod rules;
mod score;
mod types;

pub use engine::{COMPUTER, EngineTiming, GameEngine, HUMAN};
pub use events::{EngineEvent, IgnoreReason, Placement};
pub use minimax::{best_move, minimax};
pub use position::Position;
pub use rules::Outcome;
pub use score::ScoreState;
pub use types::{Board, GameMode, Player, Square};
