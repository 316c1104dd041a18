pub mod health;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::ai;
use crate::auth;
use crate::jobs;
use crate::resumes;
use crate::state::AppState;
use crate::webhooks;

pub fn build_router(state: AppState) -> Router {
    // Every resource route sits behind require_auth; there is no bypass path.
    let protected = Router::new()
        .route("/api/auth/me", get(auth::handlers::get_me))
        .route("/api/auth/profile", put(auth::handlers::update_profile))
        .route("/api/auth/account", delete(auth::handlers::delete_account))
        .route("/api/auth/stats", get(auth::handlers::profile_stats))
        .route(
            "/api/jobs",
            get(jobs::handlers::list_jobs).post(jobs::handlers::create_job),
        )
        .route("/api/jobs/stats/overview", get(jobs::stats::stats_overview))
        .route(
            "/api/jobs/:id",
            get(jobs::handlers::get_job)
                .put(jobs::handlers::update_job)
                .delete(jobs::handlers::delete_job),
        )
        .route(
            "/api/resumes",
            get(resumes::handlers::list_resumes).post(resumes::handlers::create_resume),
        )
        .route(
            "/api/resumes/:id",
            get(resumes::handlers::get_resume)
                .put(resumes::handlers::update_resume)
                .delete(resumes::handlers::delete_resume),
        )
        .route("/api/ai/summary", post(ai::handlers::draft_summary))
        .route("/api/ai/enhance", post(ai::handlers::enhance_text))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    // Personalizing routes: authenticated when possible, anonymous otherwise.
    let personalized = Router::new()
        .route("/api/auth/session", get(auth::handlers::get_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::optional_auth,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/webhooks/clerk",
            post(webhooks::handlers::handle_clerk_webhook),
        )
        .merge(protected)
        .merge(personalized)
        .with_state(state)
}
