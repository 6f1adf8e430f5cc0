//! Integration tests for the dashboard endpoints
//!
//! Tests cover:
//! - UI and health serving
//! - Score normalization through the query/analyze handlers (both scale
//!   branches)
//! - Placeholder substitution when the backend is unreachable
//! - Session-scoped last-result storage
//! - Upload forwarding

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tathya_common::api::{AnalyzeRequest, QueryRequest, UploadResponse};
use tathya_ui::backend::{BackendError, BackendGateway};
use tathya_ui::{build_router, AppState};
use tower::util::ServiceExt; // for `oneshot` method

/// Stub backend returning a fixed analysis value
struct StubBackend {
    analysis: Value,
    uploads: Arc<Mutex<Vec<(String, String, usize)>>>,
}

impl StubBackend {
    fn new(analysis: Value) -> Arc<Self> {
        Arc::new(Self {
            analysis,
            uploads: Arc::new(Mutex::new(Vec::new())),
        })
    }
}

#[async_trait]
impl BackendGateway for StubBackend {
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, BackendError> {
        self.uploads.lock().unwrap().push((
            file_name.to_string(),
            content_type.to_string(),
            bytes.len(),
        ));
        Ok(UploadResponse {
            message: "File uploaded successfully".to_string(),
            file_path: format!("Uploaded_files/{}", file_name),
            document_id: 7,
        })
    }

    async fn query(&self, _request: &QueryRequest) -> Result<Value, BackendError> {
        Ok(self.analysis.clone())
    }

    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<Value, BackendError> {
        Ok(self.analysis.clone())
    }
}

/// Stub backend that is always unreachable
struct DownBackend;

#[async_trait]
impl BackendGateway for DownBackend {
    async fn upload(
        &self,
        _file_name: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadResponse, BackendError> {
        Err(BackendError::Unreachable("connection refused".to_string()))
    }

    async fn query(&self, _request: &QueryRequest) -> Result<Value, BackendError> {
        Err(BackendError::Unreachable("connection refused".to_string()))
    }

    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<Value, BackendError> {
        Err(BackendError::Unreachable("connection refused".to_string()))
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Static assets and health
// =============================================================================

#[tokio::test]
async fn test_index_page_is_served() {
    let state = AppState::new(StubBackend::new(json!({})));
    let app = build_router(state);

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Tathya Misinformation Detector"));
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn test_app_js_is_served_with_content_type() {
    let state = AppState::new(StubBackend::new(json!({})));
    let app = build_router(state);

    let response = app.oneshot(get_request("/static/app.js")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/javascript"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = AppState::new(StubBackend::new(json!({})));
    let app = build_router(state);

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tathya-ui");
}

// =============================================================================
// Score normalization through handlers
// =============================================================================

#[tokio::test]
async fn test_fractional_score_renders_as_percent() {
    let backend = StubBackend::new(json!({
        "credibility_score": 0.82,
        "sentiment": "neutral",
        "analysis": "Mostly consistent with published reporting."
    }));
    let app = build_router(AppState::new(backend));

    let response = app
        .oneshot(json_request(
            "POST",
            "/session/analyze",
            json!({"content": "some article text"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["result"]["credibility_percent"], 82);
    assert_eq!(body["result"]["verdict"], "True");
    assert_eq!(body["result"]["verdict_hint"], "Credible");
    assert_eq!(body["result"]["sentiment"], "neutral");
    assert!(body["session"].is_string());
}

#[tokio::test]
async fn test_percent_scale_score_renders_as_percent() {
    let backend = StubBackend::new(json!({"credibility_score": 82}));
    let app = build_router(AppState::new(backend));

    let response = app
        .oneshot(json_request(
            "POST",
            "/session/query",
            json!({"query": "Is this true?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["result"]["credibility_percent"], 82);
    assert_eq!(body["result"]["verdict"], "True");
}

#[tokio::test]
async fn test_low_score_is_suspicious() {
    let backend = StubBackend::new(json!({"credibility_score": 0.1}));
    let app = build_router(AppState::new(backend));

    let response = app
        .oneshot(json_request(
            "POST",
            "/session/analyze",
            json!({"content": "vaccines cause flu"}),
        ))
        .await
        .unwrap();

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["result"]["verdict"], "False");
    assert_eq!(body["result"]["verdict_hint"], "Suspicious");
}

// =============================================================================
// Placeholder substitution
// =============================================================================

#[tokio::test]
async fn test_unreachable_backend_substitutes_placeholder() {
    let app = build_router(AppState::new(Arc::new(DownBackend)));

    let response = app
        .oneshot(json_request(
            "POST",
            "/session/analyze",
            json!({"content": "anything"}),
        ))
        .await
        .unwrap();

    // Never fails visibly: well-formed result with the placeholder flag
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["result"]["placeholder"], true);
    assert_eq!(body["result"]["verdict"], "Uncertain");
    assert_eq!(body["result"]["credibility_percent"], 0);
}

#[tokio::test]
async fn test_unreachable_backend_fails_upload_visibly() {
    let app = build_router(AppState::new(Arc::new(DownBackend)));

    let boundary = "tathya-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"doc.txt\"\r\nContent-Type: text/plain\r\n\r\nhello\r\n--{boundary}--\r\n"
        )
        .as_bytes(),
    );
    let request = Request::builder()
        .method("POST")
        .uri("/session/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    // Uploads have no placeholder to show; the failure surfaces
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("not available"));
}

// =============================================================================
// Session state
// =============================================================================

#[tokio::test]
async fn test_last_result_is_stored_per_session() {
    let backend = StubBackend::new(json!({"credibility_score": 0.5}));
    let state = AppState::new(backend);

    let response = build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/session/analyze",
            json!({"content": "text"}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    let session = body["session"].as_str().unwrap().to_string();

    let response = build_router(state.clone())
        .oneshot(get_request(&format!("/session/result?session={session}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = extract_json(response.into_body()).await;
    assert_eq!(stored["session"], session.as_str());
    assert_eq!(stored["result"]["verdict"], "Uncertain");

    // A different session has no stored result
    let other = uuid::Uuid::new_v4();
    let response = build_router(state)
        .oneshot(get_request(&format!("/session/result?session={other}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_id_is_reused_when_echoed() {
    let backend = StubBackend::new(json!({"credibility_score": 0.5}));
    let state = AppState::new(backend);

    let first = build_router(state.clone())
        .oneshot(json_request(
            "POST",
            "/session/analyze",
            json!({"content": "first"}),
        ))
        .await
        .unwrap();
    let session = extract_json(first.into_body()).await["session"]
        .as_str()
        .unwrap()
        .to_string();

    let second = build_router(state)
        .oneshot(json_request(
            "POST",
            "/session/analyze",
            json!({"content": "second", "session": session}),
        ))
        .await
        .unwrap();
    let body = extract_json(second.into_body()).await;
    assert_eq!(body["session"], session.as_str());
}

// =============================================================================
// Upload forwarding
// =============================================================================

#[tokio::test]
async fn test_upload_forwards_file_to_backend() {
    let backend = StubBackend::new(json!({}));
    let uploads = backend.uploads.clone();
    let app = build_router(AppState::new(backend));

    let boundary = "tathya-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"claim.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"%PDF-1.4 payload");
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/session/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let payload = extract_json(response.into_body()).await;
    assert_eq!(payload["message"], "File uploaded successfully");
    assert_eq!(payload["document_id"], 7);

    let uploads = uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "claim.pdf");
    assert_eq!(uploads[0].1, "application/pdf");
    assert_eq!(uploads[0].2, b"%PDF-1.4 payload".len());
}
