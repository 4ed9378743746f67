use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};
use crate::handlers::require_param;
use crate::models::{Diff, DiffMetadata, JobsSummary};
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// Aggregate job counts for the dashboard summary
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobsStatusResponse {
    /// Comparisons that found a difference
    pub failed_diffs: u64,
    /// Comparisons that found no difference
    pub successed_diffs: u64,
    pub failed_jobs: u64,
    pub job_counter: u64,
}

impl From<JobsSummary> for JobsStatusResponse {
    fn from(s: JobsSummary) -> Self {
        Self {
            failed_diffs: s.failed_diffs,
            successed_diffs: s.successed_diffs,
            failed_jobs: s.failed_jobs,
            job_counter: s.job_counter,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DiffsByTypeParams {
    /// Diff category, or `deleted_diffs` for every diff
    #[serde(rename = "type")]
    pub diff_type: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DiffDetailsParams {
    pub id: Option<String>,
}

/// Diff response DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiffResponse {
    pub id: String,
    pub category: String,
    pub job_id: String,
    pub job_name: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub timestamp: time::OffsetDateTime,
    pub diff_type: String,
    pub prod_normalized_response: String,
    pub integ_normalized_response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod_ignored_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integ_ignored_fields: Option<Vec<String>>,
    pub prod_curl_request: String,
    pub integ_curl_request: String,
    pub metadata: Option<DiffMetadata>,
    pub old_value: String,
    pub new_value: String,
}

impl From<Diff> for DiffResponse {
    fn from(d: Diff) -> Self {
        Self {
            id: d.id,
            category: d.category,
            job_id: d.job_id,
            job_name: d.job_name,
            timestamp: d.timestamp,
            diff_type: d.diff_type,
            prod_normalized_response: d.prod_normalized_response,
            integ_normalized_response: d.integ_normalized_response,
            prod_ignored_fields: d.prod_ignored_fields,
            integ_ignored_fields: d.integ_ignored_fields,
            prod_curl_request: d.prod_curl_request,
            integ_curl_request: d.integ_curl_request,
            metadata: d.metadata,
            old_value: d.old_value,
            new_value: d.new_value,
        }
    }
}

// ============ Handlers ============

/// Get aggregate job status counts
#[utoipa::path(
    get,
    path = "/api/jobsStatus",
    responses(
        (status = 200, description = "Job status counts", body = JobsStatusResponse)
    ),
    tag = "Jobs"
)]
pub async fn get_jobs_status(State(state): State<AppState>) -> AppResult<Json<JobsStatusResponse>> {
    let summary = state.store.jobs_summary().await?;

    Ok(Json(summary.into()))
}

/// List diff IDs for a category, newest first
#[utoipa::path(
    get,
    path = "/api/diffsByType",
    params(DiffsByTypeParams),
    responses(
        (status = 200, description = "Diff IDs, newest first", body = Vec<String>),
        (status = 400, description = "Type parameter missing")
    ),
    tag = "Diffs"
)]
pub async fn get_diffs_by_type(
    State(state): State<AppState>,
    Query(params): Query<DiffsByTypeParams>,
) -> AppResult<Json<Vec<String>>> {
    let diff_type = require_param(&params.diff_type, "Type")?;

    let ids = state.store.list_diff_ids(diff_type).await?;

    Ok(Json(ids))
}

/// Get a single diff
#[utoipa::path(
    get,
    path = "/api/diffDetailes",
    params(DiffDetailsParams),
    responses(
        (status = 200, description = "Diff found", body = DiffResponse),
        (status = 400, description = "Id parameter missing"),
        (status = 404, description = "Diff not found")
    ),
    tag = "Diffs"
)]
pub async fn get_diff_details(
    State(state): State<AppState>,
    Query(params): Query<DiffDetailsParams>,
) -> AppResult<Json<DiffResponse>> {
    let id = require_param(&params.id, "Id")?;

    let diff = state
        .store
        .find_diff(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Diff with id '{}'", id)))?;

    Ok(Json(diff.into()))
}

/// Delete a diff
#[utoipa::path(
    delete,
    path = "/api/diffs/{id}",
    params(
        ("id" = String, Path, description = "Diff ID")
    ),
    responses(
        (status = 204, description = "Diff deleted"),
        (status = 404, description = "Diff not found")
    ),
    tag = "Diffs"
)]
pub async fn delete_diff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.store.delete_diff(&id).await?;
    tracing::info!(diff_id = %id, "Diff deleted");

    Ok(StatusCode::NO_CONTENT)
}
