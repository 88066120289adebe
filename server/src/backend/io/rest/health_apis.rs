use axum::{http::StatusCode, response::Response};
use serde_json::json;

use super::error::respond;

/// Liveness probe
pub async fn health() -> Response {
    respond(StatusCode::OK, json!({ "status": "ok" }))
}
