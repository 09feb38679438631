//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). The engine never stores an
//! outcome; it asks these rules again after every move.

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::{is_full, is_tie};
pub use outcome::Outcome;
pub use win::{LINES, check_winner};
