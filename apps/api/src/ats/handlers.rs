//! Axum route handlers for the ATS API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ats::keywords::{extract_keywords, KeywordEntry};
use crate::ats::scoring::AtsReport;
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::state::AppState;

const MAX_KEYWORDS_LIMIT: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordsRequest {
    pub job_description: String,
    pub max_keywords: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<KeywordEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub resume: ResumeData,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub report: AtsReport,
    pub keywords: Vec<KeywordEntry>,
}

fn require_job_description(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/keywords
///
/// Returns the weighted keyword inventory of a job description.
pub async fn handle_extract_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    require_job_description(&request.job_description)?;

    let max = request
        .max_keywords
        .unwrap_or(state.config.ats_max_keywords)
        .min(MAX_KEYWORDS_LIMIT);
    let keywords = extract_keywords(&request.job_description, max);

    Ok(Json(KeywordsResponse { keywords }))
}

/// POST /api/v1/ats/score
///
/// Scores how well a resume covers the job description's keywords and lists
/// the gaps, so the user can tailor the resume before applying.
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    require_job_description(&request.job_description)?;

    let keywords = extract_keywords(&request.job_description, state.config.ats_max_keywords);
    let report = state.ats_scorer.score(&request.resume, &keywords).await?;

    info!(
        score = report.overall_score,
        strong = report.strong_matches.len(),
        gaps = report.gaps.len(),
        backend = %report.scorer_backend,
        "ATS score computed"
    );

    Ok(Json(ScoreResponse { report, keywords }))
}
