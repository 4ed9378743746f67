// Library crate for the diff monitor
// Exports modules for use by the runner binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::handlers::{
    delete_diff, get_diff_details, get_diffs_by_type, get_jobs_status, handle_duplication,
};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, Diff Monitor!" }))
        // Duplication comparisons
        .route("/api/duplication", post(handle_duplication))
        // Dashboard reads
        .route("/api/jobsStatus", get(get_jobs_status))
        .route("/api/diffsByType", get(get_diffs_by_type))
        .route("/api/diffDetailes", get(get_diff_details))
        .route("/api/diffs/{id}", delete(delete_diff))
        // The dashboard is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize tracing. `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
