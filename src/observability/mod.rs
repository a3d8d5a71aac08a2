//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! middleware installs trace id (context.rs, task-local)
//!     → handler code emits tracing events
//!     → formatter stamps the current trace id (format.rs)
//!     → one line per event on stdout (logging.rs)
//! ```
//!
//! # Design Decisions
//! - Trace ids live in task-local storage, never a shared global behind a lock
//! - JSON output for machine parsing, colored console for local development
//! - Formatter chosen once at startup from the environment flag
//! - Logging failures degrade to placeholders; they never surface to requests

pub mod context;
pub mod format;
pub mod logging;
