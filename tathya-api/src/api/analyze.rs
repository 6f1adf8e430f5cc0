//! Direct content analysis endpoint
//!
//! Deliberately lenient: any analyzer fault is converted into an
//! `{"error": ...}` body with HTTP 200 so the caller always receives a
//! well-formed JSON payload.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::path::Path;
use tathya_common::api::AnalyzeRequest;
use tracing::warn;

use crate::AppState;

/// POST /analyze
pub async fn analyze_content(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<Value> {
    let source = request.source.as_deref().unwrap_or("unknown");
    let reference_path = request.reference_file_path.as_deref().map(Path::new);

    match state
        .analyzer
        .process_content(&request.content, reference_path, source)
        .await
    {
        Ok(result) => Json(result),
        Err(e) => {
            warn!("Analysis failed: {}", e);
            Json(json!({ "error": e.to_string() }))
        }
    }
}
