//! Command-line interface for folio.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio - seasonal overlays, a cheat code and an unbeatable tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Portfolio easter eggs in your terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the terminal UI
    Play,

    /// Print the engine's best reply for a board
    Solve {
        /// Nine cells of X, O or '.', row by row (e.g. "X.O|.X.|...")
        board: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::parse_from(["folio"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
    }

    #[test]
    fn test_solve_with_json() {
        let cli = Cli::parse_from(["folio", "solve", "X........", "--json", "-c", "alt.toml"]);
        assert_eq!(
            cli.command,
            Some(Command::Solve {
                board: "X........".to_string(),
                json: true,
            })
        );
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }
}
