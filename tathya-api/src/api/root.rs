//! Liveness endpoint

use axum::Json;
use serde_json::{json, Value};

/// GET /
///
/// Liveness message for quick manual checks.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "API is running" }))
}
