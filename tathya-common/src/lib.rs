//! # Tathya Common Library
//!
//! Shared code for the Tathya misinformation-detector services including:
//! - Error types
//! - Configuration loading and root folder resolution
//! - Database initialization and the documents table
//! - API request/response types shared between backend and dashboard

pub mod api;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
