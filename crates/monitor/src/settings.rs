//! Monitor settings

use alerting::AlertConfig;
use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use session::SessionConfig;
use std::path::Path;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "hazard-monitor";

/// Environment prefix, e.g. `HAZARD__ALERT__RADIUS_KM=0.3`
pub const ENV_PREFIX: &str = "HAZARD";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn, error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// All monitor settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub alert: AlertConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from `path` (or the optional default file) layered
    /// under environment overrides
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => File::from(path),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}
