use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::info;

const CLERK_API_URL: &str = "https://api.clerk.com/v1";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity provider returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Admin-side calls to the identity provider. Trait object so tests can stub
/// the provider out.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Requests deletion of the provider-side account for a subject id.
    async fn delete_user(&self, external_id: &str) -> Result<(), IdentityError>;
}

/// Clerk Backend API client, authenticated with the instance secret key.
pub struct ClerkIdentity {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl ClerkIdentity {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            secret_key,
            base_url: CLERK_API_URL.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for ClerkIdentity {
    async fn delete_user(&self, external_id: &str) -> Result<(), IdentityError> {
        let response = self
            .client
            .delete(format!("{}/users/{}", self.base_url, external_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        let status = response.status();

        // Already gone at the provider counts as done.
        if status.is_success() || status == StatusCode::NOT_FOUND {
            info!("Requested provider-side deletion for subject {external_id}");
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(IdentityError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
