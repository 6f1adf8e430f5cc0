//! File upload endpoint
//!
//! Writes the uploaded bytes under the upload directory keyed by the
//! original filename (last-write-wins on collision) and records the stored
//! path as a new document reference row.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::Path;
use tathya_common::api::{ErrorBody, UploadResponse};
use tathya_common::db::insert_document;
use tracing::info;

use crate::AppState;

/// POST /upload/
///
/// Accepts a multipart form and stores the first part carrying a filename.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let mut stored: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let file_name = sanitize_filename(&file_name)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;

        stored = Some((file_name, bytes.to_vec()));
        break;
    }

    let Some((file_name, bytes)) = stored else {
        return Err(UploadError::MissingFile);
    };

    tokio::fs::create_dir_all(&state.uploads_dir)
        .await
        .map_err(|e| UploadError::Io(e.to_string()))?;

    let file_path = state.uploads_dir.join(&file_name);
    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| UploadError::Io(e.to_string()))?;

    let path_reference = file_path.to_string_lossy().into_owned();
    let document_id = insert_document(&state.db, &path_reference)
        .await
        .map_err(|e| UploadError::Database(e.to_string()))?;

    info!(
        "Stored upload '{}' ({} bytes) as document {}",
        file_name,
        bytes.len(),
        document_id
    );

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_path: path_reference,
        document_id,
    }))
}

/// Reduce a client-supplied filename to its final path component.
///
/// A name like `../../etc/passwd` must not escape the upload directory.
fn sanitize_filename(name: &str) -> Result<String, UploadError> {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty() && n != "." && n != "..")
        .ok_or_else(|| UploadError::InvalidFilename(name.to_string()))
}

/// Upload API errors
#[derive(Debug)]
pub enum UploadError {
    MissingFile,
    InvalidFilename(String),
    Multipart(String),
    Io(String),
    Database(String),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UploadError::MissingFile => (
                StatusCode::BAD_REQUEST,
                "No file part in multipart payload".to_string(),
            ),
            UploadError::InvalidFilename(name) => {
                (StatusCode::BAD_REQUEST, format!("Invalid filename: {}", name))
            }
            UploadError::Multipart(msg) => {
                (StatusCode::BAD_REQUEST, format!("Malformed multipart payload: {}", msg))
            }
            UploadError::Io(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store file: {}", msg),
            ),
            UploadError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain_name() {
        assert_eq!(sanitize_filename("report.pdf").unwrap(), "report.pdf");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(
            sanitize_filename("../../etc/passwd").unwrap(),
            "passwd"
        );
        assert_eq!(sanitize_filename("a/b/c.txt").unwrap(), "c.txt");
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dots() {
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename(".").is_err());
        assert!(sanitize_filename("..").is_err());
    }
}
