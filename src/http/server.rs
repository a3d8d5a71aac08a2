//! HTTP server assembly.
//!
//! # Responsibilities
//! - Wrap application routes with the request logging middleware
//! - Apply the per-request timeout inside that middleware, so timeout
//!   responses still carry the trace header and get logged
//! - Bind the configured address and serve with graceful shutdown

use std::time::Duration;

use axum::http::StatusCode;
use axum::{middleware, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::AppConfig;
use crate::http::middleware::trace_requests;
use crate::lifecycle::shutdown;

/// Errors from binding or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Layer the middleware stack over the application routes. The trace
    /// middleware is outermost so every response, timeouts included, is
    /// stamped and logged.
    pub fn new(config: AppConfig, routes: Router) -> Self {
        let router = routes
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.request_timeout_secs),
            ))
            .layer(middleware::from_fn(trace_requests));
        Self { router, config }
    }

    /// The fully layered router, for in-process testing or embedding.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until a shutdown signal.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(&self.config.bind_address)
            .await
            .map_err(|source| ServerError::Bind {
                address: self.config.bind_address.clone(),
                source,
            })?;
        let address = listener.local_addr()?.to_string();
        tracing::info!(address = address.as_str(), "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::signal())
            .await?;

        tracing::info!("shutdown complete");
        Ok(())
    }
}
