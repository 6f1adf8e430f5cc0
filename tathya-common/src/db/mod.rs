//! Database initialization and the documents table

pub mod documents;
pub mod init;

pub use documents::*;
pub use init::*;
