//! Multipart upload plumbing: collects the document fields of a request.

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;

/// Field names accepted as document uploads.
const FILE_FIELDS: &[&str] = &["file", "files"];

#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

/// Reads every document field of the request, in the order the client sent them.
/// Fields with other names are skipped.
pub async fn read_uploads(mut multipart: Multipart) -> Result<Vec<Upload>, AppError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if !FILE_FIELDS.contains(&name.as_str()) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(format!("Field '{name}' has no filename")))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{filename}': {e}")))?;

        debug!(file = %filename, bytes = bytes.len(), "Received upload");
        uploads.push(Upload { filename, bytes });
    }

    Ok(uploads)
}

/// Takes the first upload, failing when the request carried none.
pub fn single_upload(uploads: Vec<Upload>) -> Result<Upload, AppError> {
    uploads
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Validation("A 'file' field is required".to_string()))
}
