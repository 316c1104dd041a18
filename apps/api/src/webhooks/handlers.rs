use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::provisioning::placeholder_email;
use crate::errors::AppError;
use crate::state::AppState;
use crate::webhooks::signature::verify_signature;

/// Identity-provider lifecycle event, as delivered by Clerk.
/// Fields beyond what reconciliation needs are ignored.
#[derive(Debug, Deserialize)]
pub struct ClerkEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: ClerkEventData,
}

#[derive(Debug, Deserialize)]
pub struct ClerkEventData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<ClerkEmail>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClerkEmail {
    pub email_address: String,
}

/// POST /api/webhooks/clerk
///
/// Signature verification runs before any side effect; a delivery that fails
/// it is rejected with 400 and applies nothing. Once verified, dispatch always
/// acknowledges with 200 — including events for rows that no longer exist —
/// so the provider does not retry over inherently racy ordering between
/// interactive provisioning and webhook delivery.
pub async fn handle_clerk_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let msg_id = svix_header(&headers, "svix-id")?;
    let timestamp = svix_header(&headers, "svix-timestamp")?;
    let signatures = svix_header(&headers, "svix-signature")?;

    verify_signature(
        &state.config.clerk_webhook_secret,
        msg_id,
        timestamp,
        signatures,
        &body,
    )
    .map_err(|_| AppError::Validation("invalid webhook signature".to_string()))?;

    let event: ClerkEvent = serde_json::from_slice(&body)
        .map_err(|_| AppError::Validation("malformed webhook payload".to_string()))?;

    match event.event_type.as_str() {
        "user.created" => upsert_user(&state, &event.data).await?,
        "user.updated" => update_user(&state, &event.data).await?,
        "user.deleted" => delete_user(&state, &event.data).await?,
        // Forward-compatible: accept and ignore event types we do not handle.
        other => info!("Ignoring unhandled webhook event type: {other}"),
    }

    Ok((StatusCode::OK, Json(json!({ "received": true }))))
}

async fn upsert_user(state: &AppState, data: &ClerkEventData) -> Result<(), AppError> {
    let email = primary_email(data).unwrap_or_else(|| placeholder_email(&data.id));
    let name = display_name(data.first_name.as_deref(), data.last_name.as_deref());

    // A row may already exist from lazy provisioning; conflict means update.
    sqlx::query(
        r#"
        INSERT INTO users (id, external_id, email, name, avatar_url)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (external_id) DO UPDATE
        SET email = EXCLUDED.email,
            name = COALESCE(EXCLUDED.name, users.name),
            avatar_url = COALESCE(EXCLUDED.avatar_url, users.avatar_url)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&data.id)
    .bind(&email)
    .bind(&name)
    .bind(&data.image_url)
    .execute(&state.db)
    .await?;

    info!("Reconciled user.created for subject {}", data.id);
    Ok(())
}

async fn update_user(state: &AppState, data: &ClerkEventData) -> Result<(), AppError> {
    let email = primary_email(data);
    let name = display_name(data.first_name.as_deref(), data.last_name.as_deref());

    let result = sqlx::query(
        r#"
        UPDATE users
        SET email = COALESCE($2, email),
            name = COALESCE($3, name),
            avatar_url = COALESCE($4, avatar_url)
        WHERE external_id = $1
        "#,
    )
    .bind(&data.id)
    .bind(&email)
    .bind(&name)
    .bind(&data.image_url)
    .execute(&state.db)
    .await?;

    if result.rows_affected() == 0 {
        debug!("user.updated for unknown subject {}, nothing to do", data.id);
    }
    Ok(())
}

async fn delete_user(state: &AppState, data: &ClerkEventData) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM users WHERE external_id = $1")
        .bind(&data.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        debug!("user.deleted for unknown subject {}, nothing to do", data.id);
    } else {
        info!("Reconciled user.deleted for subject {}", data.id);
    }
    Ok(())
}

fn svix_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Validation(format!("missing {name} header")))
}

fn primary_email(data: &ClerkEventData) -> Option<String> {
    data.email_addresses
        .first()
        .map(|e| e.email_address.clone())
}

fn display_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
