use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::middleware::{CurrentUser, MaybeUser};
use crate::errors::AppError;
use crate::models::user::{User, PLAN_TIERS};
use crate::state::AppState;
use crate::validation::{require_one_of, require_text};

/// GET /api/auth/me
pub async fn get_me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<User>,
}

/// GET /api/auth/session
/// Personalizing route: answers for anonymous callers too.
pub async fn get_session(MaybeUser(current): MaybeUser) -> Json<SessionResponse> {
    let user = current.map(|c| c.user);
    Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    })
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub plan: Option<String>,
}

/// PUT /api/auth/profile
/// Partial update: only supplied fields change.
pub async fn update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    let name = match req.name.as_deref() {
        Some(raw) => Some(require_text("name", Some(raw))?),
        None => None,
    };
    if let Some(plan) = req.plan.as_deref() {
        require_one_of("plan", plan, PLAN_TIERS)?;
    }

    let user: User = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            plan = COALESCE($3, plan)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(current.user.id)
    .bind(name)
    .bind(req.plan)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(user))
}

#[derive(Serialize)]
pub struct ProfileStatsResponse {
    pub plan: String,
    pub member_since: DateTime<Utc>,
    pub total_jobs: i64,
    pub total_resumes: i64,
}

/// GET /api/auth/stats
pub async fn profile_stats(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ProfileStatsResponse>, AppError> {
    let total_jobs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE user_id = $1")
        .bind(current.user.id)
        .fetch_one(&state.db)
        .await?;

    let total_resumes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resumes WHERE user_id = $1")
        .bind(current.user.id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(ProfileStatsResponse {
        plan: current.user.plan,
        member_since: current.user.created_at,
        total_jobs,
        total_resumes,
    }))
}

/// DELETE /api/auth/account
///
/// Provider-side deletion goes first and fails closed: if the identity
/// provider cannot be reached the local row stays intact and the caller can
/// retry. A provider 404 counts as already deleted.
pub async fn delete_account(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    state
        .identity
        .delete_user(&current.external_id)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(current.user.id)
        .execute(&state.db)
        .await?;

    info!("Deleted account {} ({})", current.user.id, current.external_id);
    Ok(StatusCode::NO_CONTENT)
}
