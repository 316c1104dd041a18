use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Identity-provider admin API key (Clerk secret key).
    pub clerk_secret_key: String,
    /// PEM public key used for offline session-token verification.
    pub clerk_jwt_public_key: String,
    /// Webhook signing secret (`whsec_...`).
    pub clerk_webhook_secret: String,
    pub anthropic_api_key: String,
    pub frontend_origin: String,
    pub port: u16,
    /// When true: failed auth falls back to a local dev identity and error
    /// responses carry upstream detail. Must be false in any real deployment.
    pub dev_mode: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            clerk_secret_key: require_env("CLERK_SECRET_KEY")?,
            clerk_jwt_public_key: require_env("CLERK_JWT_PUBLIC_KEY")?,
            clerk_webhook_secret: require_env("CLERK_WEBHOOK_SECRET")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            frontend_origin: std::env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            dev_mode: std::env::var("DEV_MODE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
