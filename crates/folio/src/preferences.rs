//! Theme preference, the shell's only durable state.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Light or dark rendering.
///
/// Defaults to [`Theme::Dark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

impl Theme {
    /// Returns the display label for this option.
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "☀ Light",
            Self::Dark => "☾ Dark",
        }
    }

    /// Toggles between `Light` and `Dark`.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Preferences {
    /// Current theme.
    #[serde(default)]
    theme: Theme,
}

impl Preferences {
    /// Loads preferences from `path`. A missing file yields the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No saved preferences, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PreferencesError::new(format!("Failed to read preferences: {}", e)))?;
        let prefs: Self = toml::from_str(&content)
            .map_err(|e| PreferencesError::new(format!("Failed to parse preferences: {}", e)))?;

        info!(theme = %prefs.theme, "Preferences loaded");
        Ok(prefs)
    }

    /// Writes preferences to `path`, replacing the file.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), theme = %self.theme))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PreferencesError> {
        let content = toml::to_string(self).map_err(|e| {
            PreferencesError::new(format!("Failed to serialize preferences: {}", e))
        })?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| PreferencesError::new(format!("Failed to write preferences: {}", e)))?;
        debug!("Preferences saved");
        Ok(())
    }

    /// Flips the theme, returning the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }
}

/// Preferences I/O error.
#[derive(Debug, Clone, Display, Error)]
#[display("Preferences error: {} at {}:{}", message, file, line)]
pub struct PreferencesError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PreferencesError {
    /// Creates a new preferences error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
