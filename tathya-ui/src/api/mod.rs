//! HTTP handlers for the dashboard service

pub mod health;
pub mod session;
pub mod ui;

pub use health::health_check;
pub use session::{analyze_content, last_result, query_content, upload_document};
pub use ui::{serve_app_js, serve_index};
