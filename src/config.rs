//! Client configuration from the environment

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var} must be \"text\" or \"json\", got {value:?}")]
    InvalidLogFormat { var: &'static str, value: String },
}

/// How log lines are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the booking backend
    pub api_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            log_format: LogFormat::Text,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset variables take defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        const API_URL: &str = "FLIGHT_CHAT_API_URL";
        const TIMEOUT: &str = "FLIGHT_CHAT_TIMEOUT_SECS";
        const LOG_FORMAT: &str = "FLIGHT_CHAT_LOG_FORMAT";

        let api_url = lookup(API_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match lookup(TIMEOUT) {
            None => DEFAULT_TIMEOUT,
            Some(value) => {
                let parsed = value.trim().parse::<u64>();
                match parsed {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    _ => return Err(ConfigError::InvalidTimeout { var: TIMEOUT, value }),
                }
            }
        };

        let log_format = match lookup(LOG_FORMAT).as_deref().map(str::trim) {
            None | Some("" | "text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidLogFormat {
                    var: LOG_FORMAT,
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            api_url,
            timeout,
            log_format,
        })
    }
}
