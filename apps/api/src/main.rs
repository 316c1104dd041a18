mod ai;
mod auth;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod resumes;
mod routes;
mod state;
mod validation;
mod webhooks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::AiClient;
use crate::auth::identity::ClerkIdentity;
use crate::auth::verifier::ClerkVerifier;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    errors::set_expose_error_detail(config.dev_mode);

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Huntboard API v{}", env!("CARGO_PKG_VERSION"));
    if config.dev_mode {
        warn!("DEV_MODE is enabled: dev fallback identity and verbose errors are active");
    }

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Offline token verifier (no network round-trip per request)
    let verifier = Arc::new(ClerkVerifier::from_rsa_pem(&config.clerk_jwt_public_key)?);
    info!("Session token verifier initialized");

    // Identity-provider admin client
    let identity = Arc::new(ClerkIdentity::new(config.clerk_secret_key.clone()));

    // AI text client
    let ai = AiClient::new(config.anthropic_api_key.clone());
    info!("AI client initialized (model: {})", ai::MODEL);

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let state = AppState {
        db,
        verifier,
        identity,
        ai,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
