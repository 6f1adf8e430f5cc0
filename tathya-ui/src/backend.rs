//! HTTP gateway to the tathya-api backend
//!
//! The trait seam exists so dashboard handlers can be tested without a
//! running backend. `Unreachable` is distinguished from HTTP-level errors
//! because the dashboard substitutes a placeholder view for the former and
//! surfaces the latter.

use async_trait::async_trait;
use std::time::Duration;
use tathya_common::api::{AnalyzeRequest, QueryRequest, UploadResponse};
use thiserror::Error;
use tracing::debug;

/// Default base URL of the backend API
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Backend gateway errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Connection-level failure (backend down or unreachable)
    #[error("Backend not available: {0}")]
    Unreachable(String),

    /// Backend responded with a non-success status
    #[error("Backend error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Calls the dashboard makes against the backend API
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Forward an uploaded file to `POST /upload/`
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, BackendError>;

    /// `POST /query/`; returns the analysis result (the `response` field)
    async fn query(&self, request: &QueryRequest) -> Result<serde_json::Value, BackendError>;

    /// `POST /analyze`; returns the backend's JSON body verbatim
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<serde_json::Value, BackendError>;
}

/// Production gateway over reqwest
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        // Builder only fails on malformed TLS/proxy setup; fall back to the
        // default client (no timeout) rather than refusing to start.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

fn map_send_error(e: reqwest::Error) -> BackendError {
    if e.is_connect() || e.is_timeout() {
        BackendError::Unreachable(e.to_string())
    } else {
        BackendError::Api(0, e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    // Backend errors carry an {"error": ...} envelope; surface its message
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(str::to_string))
        .unwrap_or(body);

    Err(BackendError::Api(status.as_u16(), message))
}

#[async_trait]
impl BackendGateway for HttpBackend {
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, BackendError> {
        debug!("Forwarding upload '{}' ({} bytes)", file_name, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| BackendError::Parse(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/upload/"))
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        check_status(response)
            .await?
            .json::<UploadResponse>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn query(&self, request: &QueryRequest) -> Result<serde_json::Value, BackendError> {
        let response = self
            .client
            .post(self.url("/query/"))
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        let body = check_status(response)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        Ok(body["response"].clone())
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<serde_json::Value, BackendError> {
        let response = self
            .client
            .post(self.url("/analyze"))
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        check_status(response)
            .await?
            .json::<serde_json::Value>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}
