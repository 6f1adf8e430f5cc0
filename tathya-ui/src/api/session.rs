//! Dashboard session endpoints
//!
//! Bridge between the browser and the backend API. Query and analyze
//! substitute a fixed placeholder view when the backend is unreachable
//! instead of failing visibly; upload surfaces the failure, since there is
//! nothing sensible to render in its place.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tathya_common::api::{AnalyzeRequest, ErrorBody, QueryRequest, UploadResponse};
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::BackendError;
use crate::view::ResultView;
use crate::AppState;

/// Request body for POST /session/query
#[derive(Debug, Deserialize)]
pub struct SessionQueryRequest {
    pub query: String,
    #[serde(default)]
    pub session: Option<Uuid>,
    #[serde(default)]
    pub document_id: Option<i64>,
}

/// Request body for POST /session/analyze
#[derive(Debug, Deserialize)]
pub struct SessionAnalyzeRequest {
    pub content: String,
    #[serde(default)]
    pub session: Option<Uuid>,
}

/// Query parameters for GET /session/result
#[derive(Debug, Deserialize)]
pub struct ResultQuery {
    pub session: Uuid,
}

/// Response carrying the session id and the derived view
#[derive(Debug, Serialize)]
pub struct SessionResultResponse {
    pub session: Uuid,
    pub result: ResultView,
}

/// Response for POST /session/upload
#[derive(Debug, Serialize)]
pub struct SessionUploadResponse {
    pub message: String,
    pub file_path: String,
    pub document_id: i64,
}

/// POST /session/upload
///
/// Forwards the uploaded file to the backend's /upload/ endpoint.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionUploadResponse>, DashboardError> {
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DashboardError::BadRequest(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DashboardError::BadRequest(e.to_string()))?;

        upload = Some((file_name, content_type, bytes.to_vec()));
        break;
    }

    let Some((file_name, content_type, bytes)) = upload else {
        return Err(DashboardError::BadRequest(
            "No file part in multipart payload".to_string(),
        ));
    };

    let UploadResponse {
        message,
        file_path,
        document_id,
    } = state
        .backend
        .upload(&file_name, &content_type, bytes)
        .await?;

    info!("Uploaded '{}' as document {}", file_name, document_id);

    Ok(Json(SessionUploadResponse {
        message,
        file_path,
        document_id,
    }))
}

/// POST /session/query
///
/// Queries the most recently uploaded document (or a pinned one) and stores
/// the derived view as the session's last result.
pub async fn query_content(
    State(state): State<AppState>,
    Json(request): Json<SessionQueryRequest>,
) -> Result<Json<SessionResultResponse>, DashboardError> {
    let session = state.sessions.ensure(request.session);

    let backend_request = QueryRequest {
        query: request.query,
        document_id: request.document_id,
    };

    let view = match state.backend.query(&backend_request).await {
        Ok(result) => ResultView::from_analysis(&result),
        Err(BackendError::Unreachable(e)) => {
            warn!("Backend unreachable, substituting placeholder: {}", e);
            ResultView::backend_unavailable()
        }
        Err(e) => return Err(e.into()),
    };

    state.sessions.store(session, view.clone());

    Ok(Json(SessionResultResponse {
        session,
        result: view,
    }))
}

/// POST /session/analyze
///
/// Sends pasted text straight to the backend's /analyze endpoint.
pub async fn analyze_content(
    State(state): State<AppState>,
    Json(request): Json<SessionAnalyzeRequest>,
) -> Result<Json<SessionResultResponse>, DashboardError> {
    let session = state.sessions.ensure(request.session);

    let backend_request = AnalyzeRequest {
        content: request.content,
        reference_file_path: None,
        source: None,
    };

    let view = match state.backend.analyze(&backend_request).await {
        Ok(result) => ResultView::from_analysis(&result),
        Err(BackendError::Unreachable(e)) => {
            warn!("Backend unreachable, substituting placeholder: {}", e);
            ResultView::backend_unavailable()
        }
        Err(e) => return Err(e.into()),
    };

    state.sessions.store(session, view.clone());

    Ok(Json(SessionResultResponse {
        session,
        result: view,
    }))
}

/// GET /session/result?session=<uuid>
pub async fn last_result(
    State(state): State<AppState>,
    Query(query): Query<ResultQuery>,
) -> Result<Json<SessionResultResponse>, DashboardError> {
    let Some(view) = state.sessions.get(query.session) else {
        return Err(DashboardError::NoResult);
    };

    Ok(Json(SessionResultResponse {
        session: query.session,
        result: view,
    }))
}

/// Dashboard API errors
#[derive(Debug)]
pub enum DashboardError {
    BadRequest(String),
    NoResult,
    Backend(BackendError),
}

impl From<BackendError> for DashboardError {
    fn from(e: BackendError) -> Self {
        DashboardError::Backend(e)
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            DashboardError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            DashboardError::NoResult => (
                StatusCode::NOT_FOUND,
                "No result stored for this session".to_string(),
            ),
            DashboardError::Backend(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}
