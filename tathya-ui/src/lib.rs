//! tathya-ui library - dashboard service
//!
//! Serves the browser dashboard as embedded static assets and bridges user
//! actions to the tathya-api backend, deriving the presentation fields
//! (credibility percentage, verdict) and keeping the last result per
//! browser session.

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::backend::BackendGateway;
use crate::session::SessionStore;

pub mod api;
pub mod backend;
pub mod session;
pub mod view;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the backend API
    pub backend: Arc<dyn BackendGateway>,
    /// Per-session last result
    pub sessions: SessionStore,
}

impl AppState {
    /// Create new application state
    pub fn new(backend: Arc<dyn BackendGateway>) -> Self {
        Self {
            backend,
            sessions: SessionStore::new(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/health", get(api::health_check))
        .route("/session/upload", post(api::upload_document))
        .route("/session/query", post(api::query_content))
        .route("/session/analyze", post(api::analyze_content))
        .route("/session/result", get(api::last_result))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
