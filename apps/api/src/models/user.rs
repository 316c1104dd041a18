use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Allowed values for `users.plan`.
pub const PLAN_TIERS: &[&str] = &["free", "pro", "premium"];

/// A local user row. Exactly one exists per identity-provider subject id
/// (`external_id`); the external id is immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub plan: String,
    pub created_at: DateTime<Utc>,
}
