use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{CreateJobStatus, JobResult};
use crate::services::{ComparisonResult, DuplicationInput};
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// A production request duplicated onto a test environment
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicationRequest {
    /// URL the request is replayed against
    pub test_url: String,
    /// URL the request was originally served from
    pub source_url: String,
    /// JSON request body to replay
    pub content: String,
    /// Body production returned for this request
    pub expected_response: String,
    pub options: Option<DuplicationOptions>,
}

/// Accepted for compatibility; no option changes comparison behavior yet
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicationOptions {
    #[serde(alias = "allowSemanticCompresion")]
    pub allow_semantic_compression: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicationResponse {
    pub has_difference: bool,
}

// ============ Handlers ============

/// Compare a duplicated request against its expected response
#[utoipa::path(
    post,
    path = "/api/duplication",
    request_body = DuplicationRequest,
    responses(
        (status = 200, description = "Comparison completed", body = DuplicationResponse),
        (status = 400, description = "Missing testUrl or sourceUrl"),
        (status = 500, description = "Comparison failed")
    ),
    tag = "Duplication"
)]
pub async fn handle_duplication(
    State(state): State<AppState>,
    Json(payload): Json<DuplicationRequest>,
) -> AppResult<Json<DuplicationResponse>> {
    if payload.test_url.trim().is_empty() || payload.source_url.trim().is_empty() {
        return Err(AppError::Validation(
            "Invalid duplication request".to_string(),
        ));
    }

    let input = DuplicationInput {
        test_url: payload.test_url,
        source_url: payload.source_url,
        content: payload.content,
        expected_response: payload.expected_response,
    };

    match state.comparison.compare_duplicated(&input).await {
        ComparisonResult::Failed(message) => Err(AppError::Comparison(message)),
        ComparisonResult::Difference(diff) => {
            let saved = state.store.save_diff(&diff).await?;
            let status = CreateJobStatus {
                job_id: saved.job_id.clone(),
                result: JobResult::SuccessWithDiff,
                error_message: None,
            };

            // A diff must not outlive a failed status write
            if let Err(e) = state.store.save_job_status(&status).await {
                discard_orphan(&state, &saved.id).await;
                return Err(e);
            }

            tracing::info!(diff_id = %saved.id, test_url = %input.test_url, "Duplication difference recorded");
            Ok(Json(DuplicationResponse {
                has_difference: true,
            }))
        }
        ComparisonResult::NoDifference => Ok(Json(DuplicationResponse {
            has_difference: false,
        })),
    }
}

async fn discard_orphan(state: &AppState, diff_id: &str) {
    if let Err(e) = state.store.delete_diff(diff_id).await {
        tracing::error!(diff_id = %diff_id, error = %e, "Failed to remove diff without job status");
    }
}
