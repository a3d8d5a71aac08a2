//! Shared helpers for integration tests: a log-capturing subscriber and a
//! small router wrapped in the trace middleware.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;

use traceline::http::middleware::trace_requests;
use traceline::observability::format::{ConsoleFormat, JsonFormat};

/// Collects everything written by a test subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
impl LogCapture {
    pub fn raw(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Captured output split into parsed JSON lines.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.raw()
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid JSON log line"))
            .collect()
    }
}

/// JSON-format subscriber writing into `capture`.
#[allow(dead_code)]
pub fn json_subscriber(capture: &LogCapture) -> impl tracing::Subscriber + Send + Sync {
    let sink = capture.clone();
    tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .event_format(JsonFormat)
            .with_ansi(false)
            .with_writer(move || sink.clone()),
    )
}

/// Console-format subscriber with ANSI colors, writing into `capture`.
#[allow(dead_code)]
pub fn console_subscriber(capture: &LogCapture) -> impl tracing::Subscriber + Send + Sync {
    let sink = capture.clone();
    tracing_subscriber::registry().with(
        tracing_subscriber::fmt::layer()
            .event_format(ConsoleFormat)
            .with_ansi(true)
            .with_writer(move || sink.clone()),
    )
}

/// Router with the trace middleware over a few probe handlers.
pub fn app() -> Router {
    Router::new()
        .route("/healthcheck", get(|| async { "ok" }))
        .route("/users/{id}", get(user))
        .route("/echo", post(echo))
        .route("/slow", get(slow))
        .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .layer(middleware::from_fn(trace_requests))
}

async fn user(Path(id): Path<u64>) -> String {
    info!(user_id = id, "in user handler");
    format!("user-{id}")
}

async fn echo(body: Bytes) -> Bytes {
    info!("in echo handler");
    body
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_millis(50)).await;
    info!("in slow handler");
    "done"
}
