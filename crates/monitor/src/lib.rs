//! Hazard Monitor
//!
//! Runs an alert session outside of a device: settings come from a config
//! file and the environment, events are replayed from a JSON-lines log.

pub mod replay;
pub mod settings;

pub use replay::{replay, ReplayEvent, ReplayStats};
pub use settings::{LoggingConfig, Settings};

use anyhow::Context;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level: Level = config
        .level
        .parse()
        .with_context(|| format!("Invalid log level {:?}", config.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.context("Failed to set tracing subscriber")
}
