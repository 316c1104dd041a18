use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::verifier::SessionClaims;
use crate::models::user::User;

const GENERIC_DISPLAY_NAME: &str = "New User";

/// Resolves the local user for a verified subject id, creating one on first
/// sight.
///
/// An existing row is returned unmodified: interactive requests never
/// overwrite profile fields. Only the explicit profile-update and webhook
/// paths mutate.
///
/// Creation is idempotent under the unique constraint on `external_id`: a
/// concurrent first request may win the insert, in which case this writer's
/// `ON CONFLICT DO NOTHING` returns no row and we fall back to reading the
/// winner. Exactly one row exists per subject id afterwards.
pub async fn resolve_or_create(db: &PgPool, claims: &SessionClaims) -> Result<User, sqlx::Error> {
    if let Some(user) = find_by_external_id(db, &claims.subject).await? {
        return Ok(user);
    }

    let email = claims
        .email
        .clone()
        .unwrap_or_else(|| placeholder_email(&claims.subject));
    let name = claims
        .name
        .clone()
        .unwrap_or_else(|| GENERIC_DISPLAY_NAME.to_string());

    let inserted: Option<User> = sqlx::query_as(
        r#"
        INSERT INTO users (id, external_id, email, name)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (external_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&claims.subject)
    .bind(&email)
    .bind(&name)
    .fetch_optional(db)
    .await?;

    match inserted {
        Some(user) => {
            info!("Provisioned new user {} for subject {}", user.id, user.external_id);
            Ok(user)
        }
        // Lost the first-request race; the winning insert holds the row.
        None => {
            sqlx::query_as("SELECT * FROM users WHERE external_id = $1")
                .bind(&claims.subject)
                .fetch_one(db)
                .await
        }
    }
}

pub async fn find_by_external_id(
    db: &PgPool,
    external_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(db)
        .await
}

/// Best-effort email when the provider omits the claim. The synthesized
/// address is derived from the subject id so it stays stable across requests.
pub fn placeholder_email(subject: &str) -> String {
    format!("{subject}@placeholder.invalid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_email_is_stable() {
        assert_eq!(
            placeholder_email("user_2abc"),
            "user_2abc@placeholder.invalid"
        );
        assert_eq!(placeholder_email("user_2abc"), placeholder_email("user_2abc"));
    }

    #[test]
    fn test_placeholder_email_differs_per_subject() {
        assert_ne!(placeholder_email("user_a"), placeholder_email("user_b"));
    }
}
