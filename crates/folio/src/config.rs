//! Shell configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use folio_overlays::{OverlayCatalog, OverlayKind, OverlayPolicy, OverlaySpec};
use folio_tictactoe::EngineTiming;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Everything the shell reads at startup.
///
/// Every field has a default, so an empty file (or no file at all) yields the
/// stock behavior.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Whether opening an overlay closes the others.
    #[serde(default)]
    overlay_policy: OverlayPolicy,

    /// How long the cheat code stays active, in milliseconds.
    #[serde(default = "default_detector_dwell_ms")]
    detector_dwell_ms: u64,

    /// Delay before the computer starts thinking, in milliseconds.
    #[serde(default = "default_computer_trigger_ms")]
    computer_trigger_ms: u64,

    /// How long the computer thinks, in milliseconds.
    #[serde(default = "default_computer_resolution_ms")]
    computer_resolution_ms: u64,

    /// How long the logo banner stays up, in milliseconds.
    #[serde(default = "default_logo_banner_ms")]
    logo_banner_ms: u64,

    /// Where tracing output goes while the TUI owns the terminal.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Where the theme preference is persisted.
    #[serde(default = "default_preferences_path")]
    preferences_path: PathBuf,

    /// Per-overlay content overriding the built-in catalog, keyed by
    /// snake_case overlay name.
    #[serde(default)]
    overlays: HashMap<String, OverlaySpec>,
}

fn default_detector_dwell_ms() -> u64 {
    10_000
}

fn default_computer_trigger_ms() -> u64 {
    600
}

fn default_computer_resolution_ms() -> u64 {
    500
}

fn default_logo_banner_ms() -> u64 {
    3_000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("folio.log")
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("folio_preferences.toml")
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            overlay_policy: OverlayPolicy::default(),
            detector_dwell_ms: default_detector_dwell_ms(),
            computer_trigger_ms: default_computer_trigger_ms(),
            computer_resolution_ms: default_computer_resolution_ms(),
            logo_banner_ms: default_logo_banner_ms(),
            log_file: default_log_file(),
            preferences_path: default_preferences_path(),
            overlays: HashMap::new(),
        }
    }
}

impl ShellConfig {
    /// Loads `path`, or the defaults if the file does not exist.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            policy = %config.overlay_policy,
            overrides = config.overlays.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Detector dwell as a duration.
    pub fn detector_dwell(&self) -> Duration {
        Duration::from_millis(self.detector_dwell_ms)
    }

    /// Logo banner lifetime as a duration.
    pub fn logo_banner(&self) -> Duration {
        Duration::from_millis(self.logo_banner_ms)
    }

    /// Computer turn delays for the game engine.
    pub fn engine_timing(&self) -> EngineTiming {
        EngineTiming {
            trigger: Duration::from_millis(self.computer_trigger_ms),
            resolution: Duration::from_millis(self.computer_resolution_ms),
        }
    }

    /// The built-in catalog with this config's overrides applied.
    #[instrument(skip(self))]
    pub fn catalog(&self) -> Result<OverlayCatalog, ConfigError> {
        let overrides = self.overlays.iter().try_fold(
            OverlayCatalog::empty(),
            |catalog, (name, spec)| {
                let kind = OverlayKind::from_str(name)
                    .map_err(|_| ConfigError::new(format!("Unknown overlay: {}", name)))?;
                debug!(%kind, messages = spec.messages.len(), "Overlay override");
                Ok::<_, ConfigError>(catalog.with(kind, spec.clone()))
            },
        )?;
        Ok(OverlayCatalog::builtin().merge(overrides))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let volumes = self
            .overlays
            .iter()
            .filter_map(|(name, spec)| spec.audio.as_ref().map(|cue| (name, cue.volume)));
        for (name, volume) in volumes {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::new(format!(
                    "Volume for {} must be between 0 and 1, got {}",
                    name, volume
                )));
            }
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = ShellConfig::from_toml("").expect("empty config parses");
        assert_eq!(config, ShellConfig::default());
        assert_eq!(config.detector_dwell(), Duration::from_secs(10));
        assert_eq!(config.engine_timing(), EngineTiming::default());
    }

    #[test]
    fn test_overrides_merge_onto_builtin() {
        let config = ShellConfig::from_toml(
            r#"
            overlay_policy = "permissive"

            [overlays.diwali]
            messages = ["Happy Diwali"]

            [overlays.cheat_code.audio]
            track = "custom_theme"
            volume = 0.2
            "#,
        )
        .expect("valid config");

        assert_eq!(*config.overlay_policy(), OverlayPolicy::Permissive);
        let catalog = config.catalog().expect("known overlay names");
        assert_eq!(
            catalog.get(OverlayKind::Diwali).map(|s| s.messages.clone()),
            Some(vec!["Happy Diwali".to_string()])
        );
        assert_eq!(
            catalog
                .get(OverlayKind::CheatCode)
                .and_then(|s| s.audio.as_ref())
                .map(|a| a.track.as_str()),
            Some("custom_theme")
        );
        assert_eq!(
            catalog.get(OverlayKind::Halloween).map(|s| s.messages.len()),
            Some(5)
        );
    }

    #[test]
    fn test_unknown_overlay_is_an_error() {
        let config = ShellConfig::from_toml("[overlays.easter]\nmessages = []\n")
            .expect("names are checked lazily");
        let err = config.catalog().expect_err("easter is not an overlay");
        assert!(err.message.contains("easter"));
    }

    #[test]
    fn test_out_of_range_volume_is_rejected() {
        let err = ShellConfig::from_toml(
            "[overlays.tic_tac_toe.audio]\ntrack = \"loop\"\nvolume = 1.5\n",
        )
        .expect_err("volume above 1");
        assert!(err.message.contains("tic_tac_toe"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(ShellConfig::from_toml("detector_dwell_ms = \"soon\"").is_err());
    }
}
