//! Axum route handlers for the three advice endpoints.
//!
//! Inputs are opaque free text: no length or content validation here. Empty
//! fields are forwarded as-is and simply produce low-quality prompts.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CareerAdviceRequest {
    pub position_applied: String,
    pub job_description: String,
    pub resume_content: String,
}

#[derive(Debug, Serialize)]
pub struct CareerAdviceResponse {
    pub advice: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub company_name: String,
    pub position_name: String,
    pub job_description: String,
    pub resume_content: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct PolishResumeRequest {
    pub position_name: String,
    pub resume_content: String,
    pub polish_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PolishResumeResponse {
    pub polished_resume: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/advice/career
///
/// Resume improvement advice for a position and job description.
pub async fn handle_career_advice(
    State(state): State<AppState>,
    Json(request): Json<CareerAdviceRequest>,
) -> Result<Json<CareerAdviceResponse>, AppError> {
    let advice = state
        .advice
        .advise_on_resume(
            &request.position_applied,
            &request.job_description,
            &request.resume_content,
        )
        .await?;

    Ok(Json(CareerAdviceResponse { advice }))
}

/// POST /api/v1/advice/cover-letter
///
/// Customized cover letter from company, position, JD, and resume.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let cover_letter = state
        .advice
        .generate_cover_letter(
            &request.company_name,
            &request.position_name,
            &request.job_description,
            &request.resume_content,
        )
        .await?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/v1/advice/polish
///
/// Polished resume for a position; `polish_prompt` is optional and a blank
/// value behaves the same as omitting it.
pub async fn handle_polish_resume(
    State(state): State<AppState>,
    Json(request): Json<PolishResumeRequest>,
) -> Result<Json<PolishResumeResponse>, AppError> {
    let polished_resume = state
        .advice
        .polish_resume(
            &request.position_name,
            &request.resume_content,
            request.polish_prompt.as_deref(),
        )
        .await?;

    Ok(Json(PolishResumeResponse { polished_resume }))
}
