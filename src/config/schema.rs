//! Configuration schema definitions.
//!
//! Values are read once from process environment variables at startup.
//! Anything unset or unparseable falls back to its default; an unrecognized
//! environment flag fails toward production-style (JSON) log output.

use std::env;

use serde::{Deserialize, Serialize};

/// Deployment environment, selected by the `APP_ENV` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: colored console log output.
    Local,
    /// Everything else: single-line JSON log output.
    #[default]
    Production,
}

impl Environment {
    /// Parse an environment flag. Only the exact value `local` selects
    /// console output; any other value is treated as production.
    pub fn parse(value: &str) -> Self {
        if value == "local" {
            Self::Local
        } else {
            Self::Production
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment environment; drives log formatter selection.
    pub environment: Environment,

    /// Minimum log level name (DEBUG/INFO/WARNING/ERROR/CRITICAL).
    /// Unrecognized names default to INFO.
    pub log_level: String,

    /// Listener bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request timeout applied inside the logging middleware.
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            log_level: "INFO".to_string(),
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Build configuration from `APP_ENV`, `LOG_LEVEL`, `BIND_ADDRESS`, and
    /// `REQUEST_TIMEOUT_SECS`, defaulting each missing value.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            environment: env::var("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or_default(),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}
