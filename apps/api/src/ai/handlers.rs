use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ai::prompts::{enhance_prompt, summary_prompt, RESUME_WRITER_SYSTEM};
use crate::auth::middleware::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::require_text;

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub job_title: Option<String>,
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub text: Option<String>,
    pub instruction: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiTextResponse {
    pub text: String,
}

/// POST /api/ai/summary
pub async fn draft_summary(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<AiTextResponse>, AppError> {
    let job_title = require_text("job_title", req.job_title.as_deref())?;
    let prompt = summary_prompt(&job_title, req.years_experience, &req.skills);

    let text = state
        .ai
        .generate(RESUME_WRITER_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(AiTextResponse { text }))
}

/// POST /api/ai/enhance
pub async fn enhance_text(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(req): Json<EnhanceRequest>,
) -> Result<Json<AiTextResponse>, AppError> {
    let text = require_text("text", req.text.as_deref())?;
    let prompt = enhance_prompt(&text, req.instruction.as_deref());

    let text = state
        .ai
        .generate(RESUME_WRITER_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(AiTextResponse { text }))
}
