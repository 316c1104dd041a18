use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::middleware::CurrentUser;
use crate::errors::AppError;
use crate::models::job::IN_PROGRESS_STATUSES;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobStatsResponse {
    pub total: i64,
    pub in_progress: i64,
    pub offers: i64,
    pub rejected: i64,
    pub response_rate: i64,
}

/// GET /api/jobs/stats/overview
/// Derived, read-only aggregate over the owned set.
pub async fn stats_overview(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<JobStatsResponse>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE user_id = $1")
        .bind(current.user.id)
        .fetch_one(&state.db)
        .await?;

    let in_progress: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE user_id = $1 AND status = ANY($2)")
            .bind(current.user.id)
            .bind(
                IN_PROGRESS_STATUSES
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>(),
            )
            .fetch_one(&state.db)
            .await?;

    let offers: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE user_id = $1 AND status = $2")
            .bind(current.user.id)
            .bind("Offer Received")
            .fetch_one(&state.db)
            .await?;

    let rejected: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE user_id = $1 AND status = $2")
            .bind(current.user.id)
            .bind("Rejected")
            .fetch_one(&state.db)
            .await?;

    Ok(Json(JobStatsResponse {
        total,
        in_progress,
        offers,
        rejected,
        response_rate: response_rate(total, rejected),
    }))
}

/// `round(100 * (total - rejected) / total)`, 0 when there are no
/// applications.
///
/// Known quirk carried over from the product: every non-rejected application
/// counts as a "response", including ones still pending.
pub fn response_rate(total: i64, rejected: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (100.0 * (total - rejected) as f64 / total as f64).round() as i64
}
