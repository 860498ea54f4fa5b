//! PDF text via `pdf-extract`. Page breaks (form feeds) collapse to newlines.

use tracing::debug;

use super::ExtractionError;

pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    debug!(bytes = bytes.len(), chars = text.len(), "Extracted PDF text");
    Ok(collapse_page_breaks(&text))
}

fn collapse_page_breaks(text: &str) -> String {
    text.replace('\u{c}', "\n")
}
