//! Report rendering: a downloadable "improved resume" PDF built from an analysis.
//!
//! Layout (US letter, 50pt margins): title, the opening of the original text,
//! detected skills, then improvement suggestions. Purely presentational.
//! CPU-bound; callers run it inside `spawn_blocking`.

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::analysis::AnalysisReport;

const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const MARGIN_PT: f32 = 50.0;
const MM_PER_PT: f32 = 25.4 / 72.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;

const SNIPPET_CHARS: usize = 1000;
const LINE_CHARS: usize = 80;
const LAYER_NAME: &str = "Layer 1";

fn mm(points: f32) -> Mm {
    Mm(points * MM_PER_PT)
}

/// Writes lines top-down, starting a new page when the cursor passes the bottom margin.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("Failed to load Helvetica")?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("Failed to load Helvetica-Bold")?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_PT - MARGIN_PT,
        })
    }

    fn write(&mut self, text: &str, bold: bool, size: f32) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, mm(MARGIN_PT), mm(self.y), font);
    }

    /// Writes a line, advances the cursor, and breaks the page if needed.
    fn line(&mut self, text: &str, advance: f32) {
        self.write(text, false, BODY_SIZE);
        self.advance(advance);
        if self.y < MARGIN_PT {
            self.new_page();
        }
    }

    fn heading(&mut self, text: &str, size: f32, advance: f32) {
        self.write(text, true, size);
        self.advance(advance);
    }

    fn advance(&mut self, points: f32) {
        self.y -= points;
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(mm(PAGE_WIDTH_PT), mm(PAGE_HEIGHT_PT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_PT - MARGIN_PT;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().context("Failed to serialize PDF")
    }
}

/// Renders the improved-resume PDF for an analyzed text.
pub fn render_report_pdf(text: &str, report: &AnalysisReport) -> Result<Vec<u8>> {
    let mut writer = PageWriter::new("Improved Resume")?;

    writer.heading("Improved Resume", TITLE_SIZE, 30.0);

    writer.line("Original Text Snippet:", 20.0);
    let snippet = take_chars(text, SNIPPET_CHARS);
    for line in snippet.split('\n') {
        writer.line(&take_chars(line, LINE_CHARS), 15.0);
    }
    writer.advance(20.0);

    writer.heading("Detected Skills:", BODY_SIZE, 20.0);
    let skills: Vec<&str> = report.skill_names().collect();
    writer.line(&skills.join(", "), 30.0);

    writer.heading("Improvement Suggestions:", BODY_SIZE, 20.0);
    for suggestion in improvement_lines(report) {
        writer.line(&format!("- {suggestion}"), 15.0);
    }

    writer.finish()
}

/// Missing-section prompts first, then the analysis suggestions.
pub fn improvement_lines(report: &AnalysisReport) -> Vec<String> {
    report
        .missing_sections
        .iter()
        .map(|section| format!("Add {section} section"))
        .chain(report.suggestions.iter().cloned())
        .collect()
}

/// First `max` characters of `text` (not bytes).
pub fn take_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
