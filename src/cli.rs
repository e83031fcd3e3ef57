//! Command-line flags. Every flag overrides the matching config file entry.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;
use crate::digits::Direction;
use crate::style::AnimationDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => Direction::Up,
            DirectionArg::Down => Direction::Down,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "flipdeck", version, about = "Flip-clock style counter for the terminal")]
pub struct Args {
    /// Path to the config file (default: platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Value shown at startup
    #[arg(long)]
    pub start: Option<i64>,

    /// Milliseconds between advances
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Counting direction
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Length of each flip phase, e.g. 0.5, 0.5s or 500ms
    #[arg(long, value_parser = parse_duration)]
    pub duration: Option<AnimationDuration>,

    /// Write logs to this file instead of the cache directory
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_duration(value: &str) -> Result<AnimationDuration, String> {
    value.parse().map_err(|e: crate::style::StyleError| e.to_string())
}

impl Args {
    /// Overlays the flags that were given onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(start) = self.start {
            config.counter.start = start;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.counter.interval_ms = interval_ms;
        }
        if let Some(direction) = self.direction {
            config.counter.direction = direction.into();
        }
        if let Some(duration) = self.duration {
            config.animation.duration = Some(duration);
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
    }
}
