use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::config::types::Config;

/// Longest accepted flip phase.
pub const MAX_ANIMATION_DURATION: Duration = Duration::from_secs(60);

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/flipdeck/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("flipdeck").join("config.toml")
    }

    /// Default log file location, under the platform cache directory.
    pub fn default_log_path() -> PathBuf {
        let cache_dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        cache_dir.join("flipdeck").join("flipdeck.log")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The start value is not negative
    /// - The counter interval is non-zero
    /// - The animation duration is non-zero and at most a minute
    /// - Card width, height and font size are positive
    /// - The center line height is not negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counter.start < 0 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "counter.start must not be negative, got {}",
                    self.counter.start
                ),
            });
        }

        if self.counter.interval_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "counter.interval_ms must be greater than zero".to_string(),
            });
        }

        let theme = self.theme();
        if theme.animation_duration.is_zero() {
            return Err(ConfigError::ValidationError {
                message: "animation.duration must be greater than zero".to_string(),
            });
        }
        if theme.animation_duration > MAX_ANIMATION_DURATION {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "animation.duration must be at most {}s, got {}s",
                    MAX_ANIMATION_DURATION.as_secs(),
                    theme.animation_duration.as_secs_f64()
                ),
            });
        }

        let positive = [
            ("style.card.width", theme.card_width),
            ("style.card.height", theme.card_height),
            ("style.card.font_size", theme.card_font_size),
        ];
        for (name, dimension) in positive {
            if dimension.magnitude() <= 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must be positive, got {}", name, dimension),
                });
            }
        }

        let non_negative = [
            ("style.card.border_radius", theme.card_border_radius),
            ("style.center_line.height", theme.center_line_height),
        ];
        for (name, dimension) in non_negative {
            if dimension.magnitude() < 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must not be negative, got {}", name, dimension),
                });
            }
        }

        Ok(())
    }
}
