//! Request-scoped observability for an Axum service.
//!
//! Every inbound request gets a correlation id that flows through all log
//! output produced while handling it, and exactly one completion event with
//! its latency classified against fixed thresholds.
//!
//! # Architecture Overview
//!
//! ```text
//! inbound request
//!     │
//!     ▼
//! http/middleware/trace_log    adopt or generate trace id,
//!     │                        buffer mutating-method bodies, time handler
//!     ▼  (task-local scope: observability/context)
//! application handlers         emit tracing events
//!     │
//!     ▼
//! observability/format         stamp current trace id, render one line
//!     │                        (colored console locally, JSON elsewhere)
//!     ▼
//! stdout sink                  one complete line per event
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
