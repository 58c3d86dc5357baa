pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs API
        .route(
            "/api/v1/jobs",
            post(jobs::handle_ingest).get(jobs::handle_list),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get))
        .route("/api/v1/jobs/:id/status", post(jobs::handle_update_status))
        .route("/api/v1/jobs/:id/apply", post(jobs::handle_mark_applied))
        .route("/api/v1/companies", get(jobs::handle_list_companies))
        // Resume API
        .route(
            "/api/v1/resume",
            post(resumes::handle_upload).get(resumes::handle_get_active),
        )
        .with_state(state)
}
