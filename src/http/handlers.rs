//! Demo route handlers.
//!
//! Stand-ins for the real application surface; just enough to exercise the
//! middleware end to end from the binary.

use axum::body::Bytes;
use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::debug;

/// Routes served by the demo binary.
pub fn routes() -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/users/{id}", get(get_user))
        .route("/echo", post(echo))
}

async fn healthcheck() -> &'static str {
    "ok"
}

async fn get_user(Path(id): Path<u64>) -> Json<serde_json::Value> {
    debug!(user_id = id, "looking up user");
    Json(json!({ "id": id, "name": format!("user-{id}") }))
}

async fn echo(body: Bytes) -> Bytes {
    body
}
