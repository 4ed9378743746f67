use std::sync::Arc;
use uuid::Uuid;

use crate::config::EndpointConfig;
use crate::error::AppResult;
use crate::models::{CreateJobStatus, JobResult};
use crate::services::comparison::{ComparisonResult, ComparisonService};
use crate::store::DiffStore;

/// Per-outcome counts for one runner invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub no_diff: usize,
    pub with_diff: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.no_diff + self.with_diff + self.failed
    }

    fn record(&mut self, result: JobResult) {
        match result {
            JobResult::SuccessNoDiff => self.no_diff += 1,
            JobResult::SuccessWithDiff => self.with_diff += 1,
            JobResult::Failed => self.failed += 1,
        }
    }
}

/// Compares every configured endpoint once and records the outcomes
pub struct DiffRunner {
    comparison: Arc<ComparisonService>,
    store: Arc<dyn DiffStore>,
}

impl DiffRunner {
    pub fn new(comparison: Arc<ComparisonService>, store: Arc<dyn DiffStore>) -> Self {
        Self { comparison, store }
    }

    /// Endpoints are processed one at a time. A failing endpoint is
    /// recorded and the run moves on; only a job status that cannot be
    /// persisted aborts the run, after removing that endpoint's diff.
    pub async fn run_once(&self, endpoints: &[EndpointConfig]) -> AppResult<RunSummary> {
        let mut summary = RunSummary::default();

        if endpoints.is_empty() {
            tracing::warn!("No endpoints configured");
            return Ok(summary);
        }

        tracing::info!(endpoints = endpoints.len(), "Starting diff comparison run");

        for endpoint in endpoints {
            let job_id = Uuid::new_v4().to_string();
            tracing::info!(
                job_id = %job_id,
                method = %endpoint.method,
                endpoint = %endpoint.path,
                "Comparing endpoint"
            );

            let (result, error_message, diff_id) = self.evaluate(endpoint, &job_id).await;

            let status = CreateJobStatus {
                job_id,
                result,
                error_message,
            };
            if let Err(e) = self.store.save_job_status(&status).await {
                // A diff must not outlive a failed status write
                if let Some(diff_id) = diff_id {
                    if let Err(delete_err) = self.store.delete_diff(&diff_id).await {
                        tracing::error!(diff_id = %diff_id, error = %delete_err, "Failed to remove diff without job status");
                    }
                }
                return Err(e);
            }

            summary.record(result);
        }

        tracing::info!(
            no_diff = summary.no_diff,
            with_diff = summary.with_diff,
            failed = summary.failed,
            "Completed diff comparison run"
        );

        Ok(summary)
    }

    async fn evaluate(
        &self,
        endpoint: &EndpointConfig,
        job_id: &str,
    ) -> (JobResult, Option<String>, Option<String>) {
        match self.comparison.compare_endpoint(endpoint).await {
            ComparisonResult::Failed(message) => (JobResult::Failed, Some(message), None),
            ComparisonResult::Difference(mut diff) => {
                diff.job_id = job_id.to_string();
                match self.store.save_diff(&diff).await {
                    Ok(saved) => {
                        tracing::info!(job_id = %job_id, diff_id = %saved.id, category = %saved.category, "Difference recorded");
                        (JobResult::SuccessWithDiff, None, Some(saved.id))
                    }
                    Err(e) => {
                        tracing::error!(job_id = %job_id, error = %e, "Failed to save diff");
                        (JobResult::Failed, Some(e.to_string()), None)
                    }
                }
            }
            ComparisonResult::NoDifference => (JobResult::SuccessNoDiff, None, None),
        }
    }
}
