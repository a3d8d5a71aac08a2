//! HTTP server and request-interception middleware.

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::HttpServer;
