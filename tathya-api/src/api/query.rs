//! Document query endpoint
//!
//! Resolves the referenced document (explicit id if given, otherwise the
//! most recently uploaded row) and forwards the query to the analysis
//! service with `source = "unknown"`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::Path;
use tathya_common::api::{ErrorBody, QueryRequest, QueryResponse};
use tathya_common::db::{document_by_id, latest_document, Document};
use tracing::{info, warn};

use crate::AppState;

/// POST /query/
pub async fn query_document(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, QueryError> {
    let document = resolve_document(&state, request.document_id).await?;

    let Some(document) = document else {
        return Err(QueryError::NotFound);
    };

    let path = Path::new(&document.path_reference);
    if !path.exists() {
        warn!(
            "Document {} references missing file: {}",
            document.id, document.path_reference
        );
        return Err(QueryError::NotFound);
    }

    info!("Querying document {} ({})", document.id, document.path_reference);

    let response = state
        .analyzer
        .process_content(&request.query, Some(path), "unknown")
        .await
        .map_err(|e| QueryError::Analyzer(e.to_string()))?;

    Ok(Json(QueryResponse { response }))
}

async fn resolve_document(
    state: &AppState,
    document_id: Option<i64>,
) -> Result<Option<Document>, QueryError> {
    let document = match document_id {
        Some(id) => document_by_id(&state.db, id).await,
        None => latest_document(&state.db).await,
    };

    document.map_err(|e| QueryError::Database(e.to_string()))
}

/// Query API errors
#[derive(Debug)]
pub enum QueryError {
    /// No stored document, or its file is absent from disk
    NotFound,
    Database(String),
    Analyzer(String),
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            QueryError::NotFound => (
                StatusCode::NOT_FOUND,
                "Reference file not found".to_string(),
            ),
            QueryError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            QueryError::Analyzer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Analysis failed: {}", msg),
            ),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}
