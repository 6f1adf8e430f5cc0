//! API types shared between the backend and the dashboard

pub mod types;

pub use types::*;
