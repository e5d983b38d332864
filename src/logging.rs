use std::fs::File;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Installs the global subscriber. The terminal is owned by the UI, so
/// everything goes to the configured log file. `RUST_LOG` wins over the
/// configured level.
pub fn init(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("failed to create log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
