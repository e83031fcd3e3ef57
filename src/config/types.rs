use serde::Deserialize;
use std::path::PathBuf;

use crate::digits::Direction;
use crate::style::{AnimationOptions, FlipOptions, StyleOptions, Theme};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub counter: CounterConfig,
    pub animation: AnimationOptions,
    pub style: StyleOptions,
    pub logging: LoggingConfig,
}

/// Settings for the driver that advances the counter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CounterConfig {
    /// Value shown at startup (default: 0).
    #[serde(default)]
    pub start: i64,
    /// Milliseconds between advances (default: 1000).
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Initial counting direction (default: up).
    #[serde(default)]
    pub direction: Direction,
}

/// Log output settings. The terminal UI owns stdout, so logs go to a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `FLIPDECK_LOG` is unset (default: "info").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path. Defaults to the platform cache directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            start: 0,
            interval_ms: default_interval_ms(),
            direction: Direction::Up,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    pub fn flip_options(&self) -> FlipOptions {
        FlipOptions {
            animation: self.animation.clone(),
            style: self.style.clone(),
        }
    }

    /// Theme with built-in defaults for every option left out.
    pub fn theme(&self) -> Theme {
        self.flip_options().resolve()
    }
}
