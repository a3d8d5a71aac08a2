//! Logger facade: one-time subscriber initialization.
//!
//! # Responsibilities
//! - Select the formatter once at startup from the environment flag
//! - Apply the configured minimum level before any formatting happens
//! - Write complete lines to stdout
//!
//! # Design Decisions
//! - `local` environment gets colored console output, everything else JSON
//! - Unrecognized level names default to INFO, never fail startup
//! - Repeat initialization attempts are ignored; there is no re-init API

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Environment};
use crate::observability::format::{ConsoleFormat, JsonFormat};

/// Minimum severity from a configured level name. Accepts the five
/// conventional names case-insensitively; anything else defaults to INFO.
/// CRITICAL has no `tracing` counterpart and maps to ERROR.
fn min_level(log_level: &str) -> Level {
    match log_level.to_ascii_uppercase().as_str() {
        "DEBUG" => Level::DEBUG,
        "WARNING" | "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        "CRITICAL" | "FATAL" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Initialize the process-wide logger.
///
/// Safe to call more than once; only the first call takes effect. Events
/// below the configured minimum level are dropped by the filter before any
/// formatter runs.
pub fn init(config: &AppConfig) {
    let filter = EnvFilter::new(min_level(&config.log_level).to_string());
    let registry = tracing_subscriber::registry().with(filter);

    match config.environment {
        Environment::Local => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(ConsoleFormat)
                    .with_ansi(std::io::stdout().is_terminal())
                    .with_writer(std::io::stdout),
            )
            .try_init()
            .ok(),
        Environment::Production => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(JsonFormat)
                    .with_ansi(false)
                    .with_writer(std::io::stdout),
            )
            .try_init()
            .ok(),
    };
}
