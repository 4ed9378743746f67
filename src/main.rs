use anyhow::Context;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use diff_monitor::config::Config;
use diff_monitor::handlers::{
    DiffResponse, DuplicationOptions, DuplicationRequest, DuplicationResponse, JobsStatusResponse,
};
use diff_monitor::models::DiffMetadata;
use diff_monitor::state::AppState;
use diff_monitor::{build_router, handlers, init_tracing};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::duplication::handle_duplication,
        handlers::diff::get_jobs_status,
        handlers::diff::get_diffs_by_type,
        handlers::diff::get_diff_details,
        handlers::diff::delete_diff,
    ),
    components(schemas(
        DuplicationRequest,
        DuplicationOptions,
        DuplicationResponse,
        JobsStatusResponse,
        DiffResponse,
        DiffMetadata,
    )),
    tags(
        (name = "Duplication", description = "Compare duplicated requests against expected responses"),
        (name = "Diffs", description = "Recorded differences between environments"),
        (name = "Jobs", description = "Comparison job outcomes")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();

    // Initialize application state (connects to the database)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
