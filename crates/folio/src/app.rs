//! Shell state: composes the engine, detector and overlays.

use crate::accent::AccentFlash;
use crate::audio::LoggingAudio;
use crate::config::{ConfigError, ShellConfig};
use crate::input::{Action, action_for, key_token, move_cursor};
use crate::preferences::{Preferences, Theme};
use crossterm::event::KeyEvent;
use folio_overlays::{
    ActiveOverlay, KONAMI_CODE, OverlayCoordinator, OverlayKind, SequenceDetector, TimedFlag,
};
use folio_tictactoe::{GameEngine, GameMode, IgnoreReason, Outcome, Placement, Position};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::style::Color;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Text shown under the logo when it is clicked.
pub const LOGO_BANNER: &str = "> Crafted with ☕ & ✨";

/// Application state.
///
/// Every method takes the current time instead of reading a clock, so the
/// whole shell can be driven on a simulated timeline.
#[derive(Debug)]
pub struct App {
    engine: GameEngine,
    detector: SequenceDetector<String>,
    overlays: OverlayCoordinator<LoggingAudio>,
    logo: TimedFlag,
    accent: AccentFlash,
    preferences: Preferences,
    preferences_path: PathBuf,
    cursor: Position,
    status: String,
    running: bool,
}

impl App {
    /// Builds the shell from configuration and saved preferences.
    #[instrument(skip(config, preferences), fields(theme = %preferences.theme()))]
    pub fn new(config: &ShellConfig, preferences: Preferences) -> Result<Self, ConfigError> {
        let detector = SequenceDetector::new(
            KONAMI_CODE.iter().map(|k| (*k).to_string()).collect(),
            config.detector_dwell(),
        );
        let overlays = OverlayCoordinator::new(
            config.catalog()?,
            *config.overlay_policy(),
            LoggingAudio::new(),
        );

        info!("Shell state initialized");
        Ok(Self {
            engine: GameEngine::with_timing(config.engine_timing()),
            detector,
            overlays,
            logo: TimedFlag::new(config.logo_banner()),
            accent: AccentFlash::new(),
            preferences,
            preferences_path: config.preferences_path().clone(),
            cursor: Position::Center,
            status: String::new(),
            running: true,
        })
    }

    /// Seeds every random draw, for reproducible sessions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.overlays = self.overlays.with_seed(seed);
        self.accent = AccentFlash::with_rng(StdRng::seed_from_u64(seed));
        self
    }

    /// The game session.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// The overlay coordinator.
    pub fn overlays(&self) -> &OverlayCoordinator<LoggingAudio> {
        &self.overlays
    }

    /// The overlay currently on top.
    pub fn visible(&self) -> Option<&ActiveOverlay> {
        self.overlays.visible()
    }

    /// True while the cheat code is active.
    pub fn cheat_active(&self) -> bool {
        self.detector.is_active()
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        *self.preferences.theme()
    }

    /// Accent color while a theme flash is showing.
    pub fn accent(&self) -> Option<Color> {
        self.accent.current()
    }

    /// Logo banner text while it is showing.
    pub fn logo_banner(&self) -> Option<&'static str> {
        self.logo.is_active().then_some(LOGO_BANNER)
    }

    /// Last status or hint line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// False once the user asked to quit.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when board keys should go to the game.
    pub fn game_focused(&self) -> bool {
        self.visible().map(ActiveOverlay::kind) == Some(OverlayKind::TicTacToe)
    }

    /// Earliest pending timer across all components.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.engine.next_deadline(),
            self.detector.next_deadline(),
            self.logo.deadline(),
            self.accent.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Fires every timer due at `now`.
    #[instrument(skip(self))]
    pub fn tick(&mut self, now: Instant) {
        for event in self.engine.poll(now) {
            debug!(?event, "Engine event");
        }
        if let Some(event) = self.detector.poll(now) {
            self.overlays.handle_detector(event);
            self.sync_overlays();
        }
        if self.logo.poll(now) {
            debug!("Logo banner dismissed");
        }
        self.accent.poll(now);
        self.refresh_game_status();
    }

    /// Handles one key press.
    #[instrument(skip(self, key), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if let Some(token) = key_token(key.code) {
            if let Some(event) = self.detector.observe(token, now) {
                self.overlays.handle_detector(event);
                self.sync_overlays();
                self.status = "🎮 Cheat code activated!".to_string();
            }
        }

        if let Some(action) = action_for(key, self.game_focused()) {
            self.apply(action, now);
        }
    }

    /// Performs one shell action.
    #[instrument(skip(self))]
    pub fn apply(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => {
                info!("Quit requested");
                self.running = false;
            }
            Action::CloseOverlay => self.close_visible(),
            Action::ToggleTheme => self.toggle_theme(now),
            Action::LogoClick => {
                self.logo.activate(now);
            }
            Action::Open(kind) => {
                self.overlays.open(kind);
                self.sync_overlays();
                if kind == OverlayKind::TicTacToe {
                    self.refresh_game_status();
                }
            }
            Action::TogglePlayback => {
                if let Some(kind) = self.visible_kind() {
                    self.overlays.toggle_playback(kind);
                }
            }
            Action::ToggleMute => {
                if let Some(kind) = self.visible_kind() {
                    self.overlays.toggle_mute(kind);
                }
            }
            Action::Volume(delta) => self.nudge_volume(delta),
            Action::SelectMode(mode) => {
                self.engine.select_mode(mode);
                self.cursor = Position::Center;
                self.refresh_game_status();
            }
            Action::NewRound => {
                self.engine.new_round();
                self.refresh_game_status();
            }
            Action::ResetAll => {
                self.engine.reset_all();
                self.refresh_game_status();
            }
            Action::MoveCursor(code) => self.cursor = move_cursor(self.cursor, code),
            Action::PlaceAtCursor => self.place(self.cursor.to_index(), now),
            Action::Place(cell) => {
                if let Some(pos) = Position::from_index(cell) {
                    self.cursor = pos;
                }
                self.place(cell, now);
            }
        }
    }

    fn visible_kind(&self) -> Option<OverlayKind> {
        self.visible().map(ActiveOverlay::kind)
    }

    fn close_visible(&mut self) {
        let Some(kind) = self.visible_kind() else {
            return;
        };
        self.overlays.close(kind);
        self.sync_overlays();
        self.status.clear();
    }

    /// Keeps state owned by an overlay in step with it after any close,
    /// including closes forced by the exclusive policy.
    ///
    /// The game lives inside its overlay, so closing it ends the session. The
    /// detector is active exactly while its trigger overlay is open.
    fn sync_overlays(&mut self) {
        if self.detector.is_active() && !self.overlays.is_open(self.overlays.trigger()) {
            debug!("Trigger overlay closed, cancelling detector");
            self.detector.cancel();
        }
        if !self.overlays.is_open(OverlayKind::TicTacToe)
            && self.engine.mode() != GameMode::Unselected
        {
            debug!("Game overlay closed, resetting session");
            self.engine.reset_all();
        }
    }

    fn toggle_theme(&mut self, now: Instant) {
        let theme = self.preferences.toggle_theme();
        self.accent.on_toggle(now);
        info!(%theme, toggles = self.accent.toggles(), "Theme toggled");

        if let Err(e) = self.preferences.save(&self.preferences_path) {
            warn!(error = %e, "Failed to persist theme");
            self.status = format!("Theme not saved: {}", e.message);
        }
    }

    fn nudge_volume(&mut self, delta: f32) {
        let Some(kind) = self.visible_kind() else {
            return;
        };
        let current = self
            .visible()
            .and_then(ActiveOverlay::audio)
            .map(|a| a.volume);
        if let Some(volume) = current {
            self.overlays.set_volume(kind, volume + delta);
        }
    }

    fn place(&mut self, cell: usize, now: Instant) {
        match self.engine.player_move(cell, now) {
            Placement::Accepted(_) => self.refresh_game_status(),
            Placement::Ignored(reason) => {
                debug!(%reason, "Move ignored");
                self.status = hint(reason);
            }
        }
    }

    fn refresh_game_status(&mut self) {
        if !self.game_focused() {
            return;
        }
        self.status = game_status(&self.engine);
    }
}

fn hint(reason: IgnoreReason) -> String {
    match reason {
        IgnoreReason::NoModeSelected => "Pick a mode first: v vs computer, w two players".into(),
        IgnoreReason::RoundOver => "Round over, press n for another".into(),
        other => other.to_string(),
    }
}

/// One-line summary of the game for the status bar.
pub fn game_status(engine: &GameEngine) -> String {
    match (engine.mode(), engine.outcome()) {
        (GameMode::Unselected, _) => "Choose: v vs computer 🤖, w two players 👥".to_string(),
        (_, Outcome::Won(player)) => format!("🏆 {} wins! Press n for a new round", player),
        (_, Outcome::Tie) => "🤝 It's a tie! Press n for a new round".to_string(),
        (_, Outcome::InProgress) if engine.is_thinking() => "🤖 Computer is thinking...".into(),
        (GameMode::HumanVsComputer, Outcome::InProgress) if engine.is_computer_turn() => {
            "🤖 Computer's turn".into()
        }
        (_, Outcome::InProgress) => format!("{} to move", engine.to_move()),
    }
}
