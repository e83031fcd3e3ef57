mod loader;
mod types;

pub use loader::{ConfigError, MAX_ANIMATION_DURATION};
pub use types::{Config, CounterConfig, LoggingConfig};
