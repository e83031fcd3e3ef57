use anyhow::{bail, Context};
use clap::Parser;
use flipdeck::cli::Args;
use flipdeck::config::Config;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file '{}' does not exist", path.display());
            }
            Config::load_from(path)?
        }
        None => Config::load()?,
    };
    args.apply(&mut config);
    config.validate()?;

    let log_path = config
        .logging
        .file
        .clone()
        .unwrap_or_else(Config::default_log_path);
    flipdeck::logging::init_tracing(&log_path, &config.logging.level)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    flipdeck::ui::run(config)
}
