use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::AiClient;
use crate::auth::identity::IdentityProvider;
use crate::auth::verifier::TokenVerifier;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum
/// extractors. Built once at startup; the pool is the only shared mutable
/// resource across requests.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Offline session-token verifier. Trait object so tests can substitute
    /// a locally-keyed verifier.
    pub verifier: Arc<dyn TokenVerifier>,
    /// Admin-side identity-provider client (account deletion).
    pub identity: Arc<dyn IdentityProvider>,
    pub ai: AiClient,
    pub config: Config,
}
