use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Allowed values for `resumes.status`.
pub const RESUME_STATUSES: &[&str] = &["draft", "completed"];

pub const DEFAULT_RESUME_STATUS: &str = "draft";

/// A resume row. The jsonb payload columns are opaque to the server: they are
/// persisted and returned verbatim, never validated or transformed
/// (schema-on-read is the client's responsibility).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub personal_info: Value,
    pub experience: Value,
    pub education: Value,
    pub skills: Value,
    pub projects: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
