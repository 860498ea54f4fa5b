//! Text extraction: turns an uploaded PDF or DOCX into one UTF-8 text blob.
//!
//! File type is decided from the filename extension before any bytes are parsed,
//! so unsupported uploads never reach the analysis engine.

pub mod docx;
pub mod pdf;
pub mod upload;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: '{0}'. Use PDF or DOCX.")]
    UnsupportedFileType(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(FileKind::Pdf),
            "docx" => Ok(FileKind::Docx),
            _ => Err(ExtractionError::UnsupportedFileType(filename.to_string())),
        }
    }
}

/// Extracts text from document bytes. CPU-bound; run inside `spawn_blocking`.
pub fn extract_text(kind: FileKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    match kind {
        FileKind::Pdf => pdf::extract_pdf_text(bytes),
        FileKind::Docx => docx::extract_docx_text(bytes),
    }
}
