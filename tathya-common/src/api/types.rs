//! Request/response types for the backend HTTP surface
//!
//! The analysis result itself is deliberately untyped (`serde_json::Value`):
//! the external analysis service owns its schema and the backend returns it
//! verbatim.

use serde::{Deserialize, Serialize};

/// Response body for `POST /upload/`
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_path: String,
    /// Id of the inserted document row, usable to pin `/query/` to this
    /// exact document instead of "most recent".
    pub document_id: i64,
}

/// Request body for `POST /query/`
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    /// Explicit document to query against; defaults to the most recently
    /// uploaded one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<i64>,
}

/// Response body for `POST /query/`
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: serde_json::Value,
}

/// Request body for `POST /analyze`
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Uniform error envelope for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
