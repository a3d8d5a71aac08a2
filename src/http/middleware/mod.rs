//! Request-interception middleware.

pub mod trace_log;

pub use trace_log::trace_requests;
