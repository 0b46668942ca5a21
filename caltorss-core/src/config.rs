//! Runtime configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `CALTORSS_*` environment variables.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{CalToRssError, CalToRssResult};
use crate::fetch::DEFAULT_USER_AGENT;
use crate::tracing::TracingOutputFormat;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_display_timezone() -> String {
    "UTC".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration at ~/.config/caltorss/config.toml
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CalToRssConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL the server is reachable at, e.g. `https://caltorss.example.com`.
    /// When unset, feed links are built from the request's Host header.
    #[serde(default)]
    pub public_url: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// IANA zone used for dates in item titles and descriptions
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,

    #[serde(default)]
    pub log_format: TracingOutputFormat,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CalToRssConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
            user_agent: default_user_agent(),
            display_timezone: default_display_timezone(),
            log_format: TracingOutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl CalToRssConfig {
    pub fn config_path() -> CalToRssResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalToRssError::Config("Could not determine config directory".into()))?
            .join("caltorss");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> CalToRssResult<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()?).required(false),
        };

        let config: CalToRssConfig = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("CALTORSS"))
            .build()
            .map_err(|e| CalToRssError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalToRssError::Config(e.to_string()))?;

        config.timezone()?;
        Ok(config)
    }

    pub fn timezone(&self) -> CalToRssResult<Tz> {
        self.display_timezone.parse::<Tz>().map_err(|_| {
            CalToRssError::Config(format!(
                "Unknown display_timezone '{}'",
                self.display_timezone
            ))
        })
    }

    /// `host:port` to bind the server to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "port = 8080\npublic_url = \"https://feeds.example.com\"\ndisplay_timezone = \"Europe/Berlin\""
        )
        .unwrap();

        let config = CalToRssConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.public_url.as_deref(), Some("https://feeds.example.com"));
        assert_eq!(config.timezone().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.log_format, TracingOutputFormat::Pretty);
    }

    #[test]
    fn test_unknown_timezone_is_a_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "display_timezone = \"Nowhere/Special\"").unwrap();

        let err = CalToRssConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, CalToRssError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = CalToRssConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, CalToRssError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = CalToRssConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.timezone().unwrap(), Tz::UTC);
    }
}
