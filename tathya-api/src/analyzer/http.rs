//! HTTP client for the external content-analysis service

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::{AnalyzerError, ContentAnalyzer};

/// Default base URL of the analysis service
pub const DEFAULT_ANALYZER_URL: &str = "http://127.0.0.1:9000";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Wire request for the analysis service
#[derive(Debug, Serialize)]
struct ProcessRequest<'a> {
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_path: Option<String>,
    source: &'a str,
}

/// Analysis service client posting to `<base_url>/process`
pub struct HttpAnalyzer {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAnalyzer {
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
}

#[async_trait]
impl ContentAnalyzer for HttpAnalyzer {
    async fn process_content(
        &self,
        content: &str,
        reference_path: Option<&Path>,
        source: &str,
    ) -> Result<serde_json::Value, AnalyzerError> {
        let url = format!("{}/process", self.base_url.trim_end_matches('/'));
        debug!("Forwarding {} bytes of content to {}", content.len(), url);

        let request = ProcessRequest {
            content,
            reference_path: reference_path.map(|p| p.to_string_lossy().into_owned()),
            source,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Api(status.as_u16(), body));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AnalyzerError::Parse(e.to_string()))
    }
}
