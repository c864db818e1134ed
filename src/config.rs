use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{Player, COLS, PLAYER_COUNT};

/// Color names the terminal front end knows how to draw.
pub const KNOWN_COLORS: &[&str] = &["red", "blue", "yellow", "green", "magenta", "cyan", "white"];

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub players: PlayersConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Names and colors of the two players.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub first_name: String,
    pub first_color: String,
    pub second_name: String,
    pub second_color: String,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        let [first, second] = Player::default_roster();
        PlayersConfig {
            first_name: first.name,
            first_color: first.color,
            second_name: second.name,
            second_color: second.color,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Column the selector starts on
    pub start_column: usize,
    /// How long to wait for a key press before redrawing
    pub poll_interval_ms: u64,
    /// Highlight the cells changed by the most recent turn
    pub highlight_last_move: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            start_column: COLS / 2,
            poll_interval_ms: 100,
            highlight_last_move: true,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
    /// Log file. No logs are written when unset, since stdout belongs to the TUI.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file if it exists. `Ok(None)` means the
    /// file is missing.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_optional(path)? {
            Some(config) => Ok(config),
            None => {
                Self::warn_missing(path);
                Ok(Self::default())
            }
        }
    }

    /// Log that `path` was missing and defaults are in use. Call once a
    /// subscriber is installed, otherwise the event is dropped.
    pub fn warn_missing(path: &Path) {
        warn!(path = %path.display(), "config file not found, using defaults");
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let players = &self.players;
        if players.first_name.trim().is_empty() || players.second_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "player names must not be empty".into(),
            ));
        }
        if players.first_name == players.second_name {
            return Err(ConfigError::Validation(
                "player names must be distinct".into(),
            ));
        }
        for color in [&players.first_color, &players.second_color] {
            if !KNOWN_COLORS.contains(&color.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "unknown player color '{}' (expected one of {})",
                    color,
                    KNOWN_COLORS.join(", ")
                )));
            }
        }
        if players.first_color == players.second_color {
            return Err(ConfigError::Validation(
                "player colors must be distinct".into(),
            ));
        }

        if self.ui.start_column >= COLS {
            return Err(ConfigError::Validation(format!(
                "ui.start_column must be < {}",
                COLS
            )));
        }
        if self.ui.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.poll_interval_ms must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// The two players described by this configuration
    pub fn roster(&self) -> [Player; PLAYER_COUNT] {
        let players = &self.players;
        [
            Player::new(players.first_name.clone(), players.first_color.clone()),
            Player::new(players.second_name.clone(), players.second_color.clone()),
        ]
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
