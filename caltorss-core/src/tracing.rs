//! Tracing setup shared by the CLI and the server.
//!
//! `RUST_LOG` overrides the configured level when set.

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingOutputFormat {
    /// Human-readable multi-line format
    #[default]
    Pretty,
    /// Single-line format
    Compact,
    /// JSON lines, for log collectors
    Json,
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level directive used when RUST_LOG is not set, e.g. `info` or `debug`
    pub level: String,
    pub output_format: TracingOutputFormat,
    pub include_location: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output_format: TracingOutputFormat::Pretty,
            include_location: false,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Filter directive applied when RUST_LOG is absent. Our own crates log at
    /// the configured level; everything else stays at `warn`.
    fn default_directive(&self) -> String {
        let level = &self.level;
        format!("warn,caltorss={level},caltorss_core={level},caltorss_server={level},tower_http={level}")
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.default_directive())?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.output_format {
        TracingOutputFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(config.include_location)
                .with_line_number(config.include_location);
            tracing::subscriber::set_global_default(registry.with(layer))?;
        }
        TracingOutputFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_file(config.include_location)
                .with_line_number(config.include_location);
            tracing::subscriber::set_global_default(registry.with(layer))?;
        }
        TracingOutputFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_file(config.include_location)
                .with_line_number(config.include_location);
            tracing::subscriber::set_global_default(registry.with(layer))?;
        }
    }

    Ok(())
}
