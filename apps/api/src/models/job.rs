use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Allowed values for `jobs.status`.
pub const JOB_STATUSES: &[&str] = &[
    "Applied",
    "Under Review",
    "Shortlisted",
    "Interview Scheduled",
    "Interviewed",
    "Offer Received",
    "Rejected",
];

/// Statuses counted as "in progress" by the stats overview.
pub const IN_PROGRESS_STATUSES: &[&str] = &[
    "Applied",
    "Under Review",
    "Shortlisted",
    "Interview Scheduled",
    "Interviewed",
];

/// Allowed values for `jobs.job_type`.
pub const JOB_TYPES: &[&str] = &[
    "Full-time",
    "Part-time",
    "Contract",
    "Freelance",
    "Internship",
];

/// Allowed values for `jobs.work_type`.
pub const WORK_TYPES: &[&str] = &["On-site", "Remote", "Hybrid", "Field-work"];

pub const DEFAULT_STATUS: &str = "Applied";
pub const DEFAULT_JOB_TYPE: &str = "Full-time";
pub const DEFAULT_WORK_TYPE: &str = "On-site";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub status: String,
    pub job_type: String,
    pub work_type: String,
    pub notes: Option<String>,
    pub posting_url: Option<String>,
    pub contact_email: Option<String>,
    pub applied_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
