use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::CurrentUser;
use crate::errors::AppError;
use crate::models::resume::{ResumeRow, DEFAULT_RESUME_STATUS, RESUME_STATUSES};
use crate::state::AppState;
use crate::validation::{require_one_of, require_text};

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub title: Option<String>,
    pub personal_info: Option<Value>,
    pub experience: Option<Value>,
    pub education: Option<Value>,
    pub skills: Option<Value>,
    pub projects: Option<Value>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    pub title: Option<String>,
    pub personal_info: Option<Value>,
    pub experience: Option<Value>,
    pub education: Option<Value>,
    pub skills: Option<Value>,
    pub projects: Option<Value>,
    pub status: Option<String>,
}

/// GET /api/resumes
pub async fn list_resumes(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes: Vec<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(current.user.id)
            .fetch_all(&state.db)
            .await?;

    Ok(Json(resumes))
}

/// GET /api/resumes/:id
pub async fn get_resume(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(current.user.id)
            .fetch_optional(&state.db)
            .await?;

    resume
        .map(Json)
        .ok_or_else(|| AppError::NotFound("resume not found".to_string()))
}

/// POST /api/resumes
/// Payload sub-objects are persisted verbatim; absent ones start empty.
pub async fn create_resume(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let title = require_text("title", req.title.as_deref())?;
    let status = req
        .status
        .unwrap_or_else(|| DEFAULT_RESUME_STATUS.to_string());
    require_one_of("status", &status, RESUME_STATUSES)?;

    let resume: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes
            (id, user_id, title, personal_info, experience, education, skills,
             projects, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(current.user.id)
    .bind(&title)
    .bind(req.personal_info.unwrap_or_else(|| json!({})))
    .bind(req.experience.unwrap_or_else(|| json!([])))
    .bind(req.education.unwrap_or_else(|| json!([])))
    .bind(req.skills.unwrap_or_else(|| json!([])))
    .bind(req.projects.unwrap_or_else(|| json!([])))
    .bind(&status)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(resume)))
}

/// PUT /api/resumes/:id
/// Merges only the supplied columns; unset ones retain their previous value.
pub async fn update_resume(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    let title = match req.title.as_deref() {
        Some(raw) => Some(require_text("title", Some(raw))?),
        None => None,
    };
    if let Some(status) = req.status.as_deref() {
        require_one_of("status", status, RESUME_STATUSES)?;
    }

    let resume: Option<ResumeRow> = sqlx::query_as(
        r#"
        UPDATE resumes
        SET title = COALESCE($3, title),
            personal_info = COALESCE($4, personal_info),
            experience = COALESCE($5, experience),
            education = COALESCE($6, education),
            skills = COALESCE($7, skills),
            projects = COALESCE($8, projects),
            status = COALESCE($9, status),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(current.user.id)
    .bind(title)
    .bind(req.personal_info)
    .bind(req.experience)
    .bind(req.education)
    .bind(req.skills)
    .bind(req.projects)
    .bind(&req.status)
    .fetch_optional(&state.db)
    .await?;

    resume
        .map(Json)
        .ok_or_else(|| AppError::NotFound("resume not found".to_string()))
}

/// DELETE /api/resumes/:id
pub async fn delete_resume(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(current.user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("resume not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_preserved_verbatim_through_parse() {
        // The server never reshapes the structured payload.
        let body = r#"{
            "title": "Backend Resume",
            "personal_info": {"fullName": "Ada", "links": [{"label": "gh"}]},
            "skills": [{"name": "Rust", "level": "Expert"}]
        }"#;
        let req: CreateResumeRequest = serde_json::from_str(body).unwrap();

        assert_eq!(
            req.personal_info.unwrap(),
            json!({"fullName": "Ada", "links": [{"label": "gh"}]})
        );
        assert_eq!(
            req.skills.unwrap(),
            json!([{"name": "Rust", "level": "Expert"}])
        );
    }

    #[test]
    fn test_title_mandatory() {
        let req: CreateResumeRequest = serde_json::from_str("{}").unwrap();
        assert!(require_text("title", req.title.as_deref()).is_err());
    }

    #[test]
    fn test_default_status_is_valid() {
        assert!(require_one_of("status", DEFAULT_RESUME_STATUS, RESUME_STATUSES).is_ok());
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(require_one_of("status", "published", RESUME_STATUSES).is_err());
    }
}
