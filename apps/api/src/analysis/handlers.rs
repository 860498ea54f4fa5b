//! Axum route handlers for the Analysis API.
//!
//! Handlers only move bytes: extraction, analysis and rendering are CPU-bound and run
//! inside `tokio::task::spawn_blocking`.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::info;

use crate::analysis::{analyze, AnalysisReport, KnowledgeBase};
use crate::errors::AppError;
use crate::extraction::upload::{read_uploads, single_upload, Upload};
use crate::extraction::{extract_text, FileKind};
use crate::render::{render_report_pdf, take_chars};
use crate::state::AppState;

const MIN_COMPARE_FILES: usize = 2;
const TOP_SKILLS_IN_COMPARISON: usize = 5;
const EXPORT_FILENAME: &str = "resume_analysis.json";
const PDF_FILENAME: &str = "improved_resume.pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub filename: String,
    pub text_snippet: String,
    pub top_words: Vec<(String, usize)>,
    pub report: AnalysisReport,
}

/// Summary row for one resume in a comparison.
#[derive(Debug, Serialize)]
pub struct ComparisonEntry {
    pub filename: String,
    pub completeness_score: u32,
    pub ats_score: u32,
    pub skills_count: usize,
    pub top_skills: Vec<String>,
    pub missing_sections: Vec<String>,
    pub word_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub results: Vec<ComparisonEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub format: String,
    pub exported_at: DateTime<Utc>,
    pub analysis: AnalyzeResponse,
}

/// Extracted text and its report for one uploaded file.
struct AnalyzedUpload {
    filename: String,
    text: String,
    report: AnalysisReport,
}

impl AnalyzedUpload {
    fn into_analyze_response(self, snippet_chars: usize) -> AnalyzeResponse {
        let summary = self.report.skill_summary(&self.text);
        AnalyzeResponse {
            filename: self.filename,
            text_snippet: take_chars(&self.text, snippet_chars),
            top_words: summary.top_words,
            report: self.report,
        }
    }

    fn comparison_entry(&self) -> ComparisonEntry {
        ComparisonEntry {
            filename: self.filename.clone(),
            completeness_score: self.report.completeness_score,
            ats_score: self.report.ats_score,
            skills_count: self.report.detected_skills.len(),
            top_skills: self
                .report
                .skill_names()
                .take(TOP_SKILLS_IN_COMPARISON)
                .map(String::from)
                .collect(),
            missing_sections: self.report.missing_sections.clone(),
            word_count: self.report.content_quality.word_count,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocking pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Checks the file type up front, then extracts and analyzes on the blocking pool.
fn spawn_analysis(
    upload: Upload,
    kb: &Arc<KnowledgeBase>,
) -> Result<JoinHandle<Result<AnalyzedUpload, AppError>>, AppError> {
    let kind = FileKind::from_filename(&upload.filename)?;
    let kb = Arc::clone(kb);

    Ok(tokio::task::spawn_blocking(move || -> Result<AnalyzedUpload, AppError> {
        let text = extract_text(kind, &upload.bytes)?;
        let report = analyze(&text, &kb);
        info!(
            file = %upload.filename,
            words = report.content_quality.word_count,
            completeness = report.completeness_score,
            "Analyzed resume"
        );
        Ok(AnalyzedUpload {
            filename: upload.filename,
            text,
            report,
        })
    }))
}

async fn join_analysis(
    handle: JoinHandle<Result<AnalyzedUpload, AppError>>,
) -> Result<AnalyzedUpload, AppError> {
    handle.await.map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}"))
    })?
}

async fn analyze_single(state: &AppState, multipart: Multipart) -> Result<AnalyzedUpload, AppError> {
    let upload = single_upload(read_uploads(multipart).await?)?;
    join_analysis(spawn_analysis(upload, &state.knowledge_base)?).await
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload of one PDF or DOCX (`file` field). Returns the full report
/// plus a text snippet and the most frequent words.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analyzed = analyze_single(&state, multipart).await?;
    Ok(Json(analyzed.into_analyze_response(state.config.snippet_chars)))
}

/// POST /api/v1/analyze/text
///
/// Analyzes already-extracted text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let kb = Arc::clone(&state.knowledge_base);
    let report = tokio::task::spawn_blocking(move || analyze(&request.text, &kb))
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}"))
        })?;
    Ok(Json(report))
}

/// POST /api/v1/compare
///
/// Analyzes two or more uploads concurrently. Results mirror the upload order.
pub async fn handle_compare(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CompareResponse>, AppError> {
    let uploads = read_uploads(multipart).await?;
    if uploads.len() < MIN_COMPARE_FILES {
        return Err(AppError::Validation(format!(
            "At least {MIN_COMPARE_FILES} files are required for comparison, got {}",
            uploads.len()
        )));
    }

    let handles = uploads
        .into_iter()
        .map(|upload| spawn_analysis(upload, &state.knowledge_base))
        .collect::<Result<Vec<_>, _>>()?;

    // Awaiting in spawn order keeps results aligned with the uploads.
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(join_analysis(handle).await?.comparison_entry());
    }

    Ok(Json(CompareResponse { results }))
}

/// POST /api/v1/export?format=json
///
/// Same analysis as `/analyze`, delivered as a downloadable document.
pub async fn handle_export(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let format = query.format.unwrap_or_else(|| "json".to_string());
    if !format.eq_ignore_ascii_case("json") {
        return Err(AppError::Validation(format!(
            "Unsupported export format '{format}'. Supported formats: json"
        )));
    }

    let analyzed = analyze_single(&state, multipart).await?;
    let document = ExportDocument {
        format: "json".to_string(),
        exported_at: Utc::now(),
        analysis: analyzed.into_analyze_response(state.config.snippet_chars),
    };

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILENAME}\""),
        )],
        Json(document),
    ))
}

/// POST /api/v1/generate-resume
///
/// Renders the analysis of one upload as an "improved resume" PDF.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let analyzed = analyze_single(&state, multipart).await?;

    let pdf = tokio::task::spawn_blocking(move || render_report_pdf(&analyzed.text, &analyzed.report))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILENAME}\""),
            ),
        ],
        pdf,
    ))
}
