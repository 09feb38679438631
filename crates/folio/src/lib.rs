//! Folio - terminal shell for the portfolio's easter eggs.
//!
//! Composes the two core crates behind a ratatui front end:
//!
//! - [`folio_tictactoe`] for the game overlay,
//! - [`folio_overlays`] for the cheat-code detector and overlay lifecycle.
//!
//! The shell owns everything the cores leave out: configuration, the theme
//! preference, the audio backend and the event loop that sleeps until the
//! next deadline.

#![warn(missing_docs)]

pub mod accent;
pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod input;
pub mod preferences;
pub mod solve;
pub mod tui;
pub mod ui;

pub use app::App;
pub use config::{ConfigError, ShellConfig};
pub use preferences::{Preferences, PreferencesError, Theme};
