//! External content-analysis seam
//!
//! The scoring algorithm lives outside this repository. Its contract is
//! opaque: we forward `(content, reference_path, source)` and hand the JSON
//! result back verbatim. The trait exists so tests can substitute a stub.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

mod http;
pub use http::{HttpAnalyzer, DEFAULT_ANALYZER_URL};

/// Analysis service errors
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Analysis service error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// External content-analysis function.
///
/// Implementations score `content` for credibility/sentiment, optionally
/// consulting the referenced on-disk document. The returned JSON schema is
/// owned by the analysis service and passed through unmodified.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    async fn process_content(
        &self,
        content: &str,
        reference_path: Option<&Path>,
        source: &str,
    ) -> Result<serde_json::Value, AnalyzerError>;
}
