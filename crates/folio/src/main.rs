//! Folio - unified CLI.

use anyhow::Result;
use clap::Parser;
use folio::cli::{Cli, Command};
use folio::{App, Preferences, ShellConfig, solve, tui};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&cli.config).await,
        Command::Solve { board, json } => run_solve(&board, json),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,folio=debug"))
}

/// Run the terminal UI
async fn run_play(config_path: &Path) -> Result<()> {
    // The TUI owns the terminal, so logs go to a file.
    let config = ShellConfig::load(config_path)?;
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(config = %config_path.display(), "Starting folio");

    let preferences = Preferences::load(config.preferences_path()).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable preferences");
        Preferences::default()
    });
    let app = App::new(&config, preferences)?;
    tui::run_tui(app).await
}

/// Print the best reply for a board
fn run_solve(board: &str, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let report = solve::solve(board)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
