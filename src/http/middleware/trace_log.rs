//! Request logging middleware.
//!
//! Every inbound request gets a correlation id: adopted verbatim from the
//! `x-trace-id` header when the caller supplies a non-empty value, generated
//! as a UUID v4 otherwise. The id is installed in task-local storage for the
//! whole downstream call, so every log line emitted while handling the
//! request carries it, and the response is stamped with the same header on
//! the way out — including error and timeout responses.
//!
//! One log event is emitted per request (health probes excepted) with the
//! path, method, status code, duration, and the captured body for mutating
//! methods. Body capture is read-transparent: the handler still receives the
//! exact original bytes, exactly once.

use std::time::Instant;

use axum::body::Body;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::BodyExt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::observability::context;

/// Correlation header, read from the request and stamped on the response.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Requests slower than this (exclusive) are logged at WARN.
pub const SLOW_REQUEST_THRESHOLD_MS: u64 = 3000;

/// Requests slower than this (exclusive) are logged at WARN with a
/// "very slow" marker.
pub const VERY_SLOW_REQUEST_THRESHOLD_MS: u64 = 5000;

/// Largest body captured for logging. Bigger bodies are still replayed to
/// the handler untouched, just not logged.
const MAX_CAPTURED_BODY_BYTES: usize = 64 * 1024;

/// Latency band for a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pace {
    Normal,
    Slow,
    VerySlow,
}

fn classify(duration_ms: u64) -> Pace {
    if duration_ms > VERY_SLOW_REQUEST_THRESHOLD_MS {
        Pace::VerySlow
    } else if duration_ms > SLOW_REQUEST_THRESHOLD_MS {
        Pace::Slow
    } else {
        Pace::Normal
    }
}

/// Axum middleware entry point.
///
/// Installs the trace id for the downstream handler and stamps it on
/// whatever response comes back; the request path is never failed by
/// anything this middleware does.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let trace_id = inbound_trace_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = context::scope(trace_id.clone(), handle(request, next)).await;

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
    response
}

/// A non-empty caller-supplied correlation id, adopted verbatim.
fn inbound_trace_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

async fn handle(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    // Health probes poll constantly; forward them without logging.
    if path.ends_with("/healthcheck") {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let (request, content) = if carries_body(&method) {
        capture_body(request).await
    } else {
        (request, None)
    };

    let start = Instant::now();
    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let status_code = response.status().as_u16();
    log_completion(&path, &method, status_code, duration_ms, content.as_deref());

    response
}

/// Methods that conventionally carry a request body.
fn carries_body(method: &Method) -> bool {
    matches!(method.as_str(), "POST" | "PUT" | "PATCH")
}

/// Buffer the request body so it can be logged, then rebuild the request
/// around the buffered bytes. Capture failure downgrades to logging without
/// a body; it never fails the request.
async fn capture_body(request: Request) -> (Request, Option<String>) {
    let (parts, body) = request.into_parts();
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            let content = if bytes.is_empty() || bytes.len() > MAX_CAPTURED_BODY_BYTES {
                None
            } else {
                std::str::from_utf8(&bytes).ok().map(str::to_owned)
            };
            (Request::from_parts(parts, Body::from(bytes)), content)
        }
        Err(error) => {
            warn!(
                error = &error as &(dyn std::error::Error + 'static),
                "failed to buffer request body for logging"
            );
            (Request::from_parts(parts, Body::empty()), None)
        }
    }
}

/// Emit the single completion event for a request.
///
/// Fields are recorded as scalars (`method` as `&str`), since the
/// structured formatter drops non-scalar values.
fn log_completion(
    path: &str,
    method: &Method,
    status_code: u16,
    duration_ms: u64,
    content: Option<&str>,
) {
    let method = method.as_str();
    match classify(duration_ms) {
        Pace::VerySlow => warn!(
            path,
            method,
            status_code,
            duration_ms,
            content,
            "very slow request (>{}ms)",
            VERY_SLOW_REQUEST_THRESHOLD_MS
        ),
        Pace::Slow => warn!(
            path,
            method,
            status_code,
            duration_ms,
            content,
            "slow request (>{}ms)",
            SLOW_REQUEST_THRESHOLD_MS
        ),
        Pace::Normal => info!(
            path,
            method,
            status_code,
            duration_ms,
            content,
            "request processed"
        ),
    }
}
