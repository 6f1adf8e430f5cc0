//! tathya-api library - backend HTTP service
//!
//! Accepts document uploads, records their on-disk path in the documents
//! table, and forwards queries or raw text to the external content-analysis
//! service.

use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::analyzer::ContentAnalyzer;

pub mod analyzer;
pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Directory uploaded files are written to
    pub uploads_dir: PathBuf,
    /// External content-analysis service
    pub analyzer: Arc<dyn ContentAnalyzer>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, uploads_dir: PathBuf, analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        Self {
            db,
            uploads_dir,
            analyzer,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health_check))
        .route("/upload/", post(api::upload_file))
        .route("/query/", post(api::query_document))
        .route("/analyze", post(api::analyze_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
