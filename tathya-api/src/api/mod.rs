//! HTTP API handlers for tathya-api

pub mod analyze;
pub mod health;
pub mod query;
pub mod root;
pub mod upload;

pub use analyze::analyze_content;
pub use health::health_check;
pub use query::query_document;
pub use root::root;
pub use upload::upload_file;
