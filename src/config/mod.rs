//! Runtime configuration.
//!
//! # Responsibilities
//! - Read the environment flag, log level, and listener settings once at startup
//! - Default every unset or unparseable value (configuration is never fatal)

pub mod schema;

pub use schema::{AppConfig, Environment};
