//! Inspector configuration (env-driven, overridable from the command line).

use anyhow::{bail, Result};

use crate::output::OutputFormat;

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Inspector configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Default output format when `--format` is not given.
    pub output_format: OutputFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let log_level = lookup("RELAY_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match lookup("RELAY_LOG_FORMAT").as_deref() {
            None | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("RELAY_LOG_FORMAT must be `compact` or `json`, got `{other}`."),
        };

        let output_format = match lookup("RELAY_INSPECT_FORMAT") {
            None => OutputFormat::default(),
            Some(v) => v
                .parse()
                .map_err(|e| anyhow::anyhow!("RELAY_INSPECT_FORMAT: {e}"))?,
        };

        Ok(Self {
            log_level,
            log_format,
            output_format,
        })
    }
}
