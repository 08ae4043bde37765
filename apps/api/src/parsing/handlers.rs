//! Axum route handlers for the CV parsing API.

use std::collections::BTreeMap;

use anyhow::Context;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::cv::CvRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SkillReportResponse {
    /// Canonical skill name → occurrence count.
    pub skills: BTreeMap<String, usize>,
    /// Vocabulary category → matched skills.
    pub categories: BTreeMap<String, Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/parse
///
/// Runs the full pipeline over plain résumé text.
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<CvRecord>, AppError> {
    validate_text(&request.text, state.config.max_text_bytes)?;

    let parser = state.parser.clone();
    let record = tokio::task::spawn_blocking(move || parser.parse(&request.text))
        .await
        .context("CV parse task failed")?;

    Ok(Json(record))
}

/// POST /api/v1/cv/skills
///
/// Skill occurrence counts plus the matches grouped by category.
pub async fn handle_skills(
    State(state): State<AppState>,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<SkillReportResponse>, AppError> {
    validate_text(&request.text, state.config.max_text_bytes)?;

    let parser = state.parser.clone();
    let report = tokio::task::spawn_blocking(move || SkillReportResponse {
        skills: parser.skill_frequencies(&request.text),
        categories: parser.skills_by_category(&request.text),
    })
    .await
    .context("skill report task failed")?;

    Ok(Json(report))
}

fn validate_text(text: &str, max_bytes: usize) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    if text.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "text is {} bytes; the limit is {max_bytes}",
            text.len()
        )));
    }
    Ok(())
}
