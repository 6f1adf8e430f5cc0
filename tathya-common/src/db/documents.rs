//! Document reference queries
//!
//! A document reference is a row recording the on-disk path of an uploaded
//! file. Rows are append-only: created on upload, never mutated, never
//! removed. The "current" document for a query is the row with the highest
//! id unless the caller pins an explicit id.

use crate::Result;
use serde::Serialize;
use sqlx::SqlitePool;

/// A row in the documents table
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: i64,
    pub path_reference: String,
}

/// Insert a new document reference and return its assigned id.
///
/// `path_reference` is UNIQUE: re-inserting the same path is a constraint
/// violation that propagates to the caller (fail-fast, no upsert).
pub async fn insert_document(pool: &SqlitePool, path_reference: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO documents (path_reference) VALUES (?)")
        .bind(path_reference)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Fetch the most recently inserted document reference, if any
pub async fn latest_document(pool: &SqlitePool) -> Result<Option<Document>> {
    let row: Option<(i64, String)> = sqlx::query_as(
        "SELECT id, path_reference FROM documents ORDER BY id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, path_reference)| Document { id, path_reference }))
}

/// Fetch a specific document reference by id
pub async fn document_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Document>> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT id, path_reference FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(id, path_reference)| Document { id, path_reference }))
}

/// Count stored document references
pub async fn count_documents(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
