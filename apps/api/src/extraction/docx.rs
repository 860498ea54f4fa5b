//! DOCX text: reads `word/document.xml` out of the zip container and emits one line
//! per paragraph, joining the paragraph's text runs.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text runs, tabs, line breaks and paragraph ends, in document order.
static BODY_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|<w:tab/>|<w:(?:br|cr)(?:\s[^>]*)?/>|</w:p>")
        .expect("valid regex")
});

pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let text = paragraphs_from_xml(&xml).join("\n");
    debug!(bytes = bytes.len(), chars = text.len(), "Extracted DOCX text");
    Ok(text)
}

fn paragraphs_from_xml(xml: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for caps in BODY_TOKEN.captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            current.push_str(&unescape_xml(run.as_str()));
            continue;
        }
        match &caps[0] {
            "</w:p>" => paragraphs.push(std::mem::take(&mut current)),
            "<w:tab/>" => current.push('\t'),
            _ => current.push('\n'),
        }
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Named and numeric (`&#N;`, `&#xH;`) entity references.
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9a-fA-F]+)|(lt|gt|quot|apos|amp));").expect("valid regex")
});

/// Decodes entity references in one pass, so `&amp;lt;` stays `&lt;`.
/// References to invalid code points are kept verbatim.
fn unescape_xml(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else {
                match &caps[3] {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => Some('&'),
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Minimal DOCX container with one paragraph per entry.
#[cfg(test)]
pub(crate) fn docx_from_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(DOCUMENT_PART, zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
