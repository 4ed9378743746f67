use async_trait::async_trait;
use diff_monitor::error::{AppError, AppResult};
use diff_monitor::models::{CreateJobStatus, Diff, JobStatus, JobsSummary};
use diff_monitor::store::{DiffStore, InMemoryStore};

/// Store whose job status writes always fail
#[allow(dead_code)]
pub struct BrokenJobStatusStore {
    pub inner: InMemoryStore,
}

#[async_trait]
impl DiffStore for BrokenJobStatusStore {
    async fn save_diff(&self, diff: &Diff) -> AppResult<Diff> {
        self.inner.save_diff(diff).await
    }

    async fn find_diff(&self, id: &str) -> AppResult<Option<Diff>> {
        self.inner.find_diff(id).await
    }

    async fn list_diff_ids(&self, category: &str) -> AppResult<Vec<String>> {
        self.inner.list_diff_ids(category).await
    }

    async fn delete_diff(&self, id: &str) -> AppResult<()> {
        self.inner.delete_diff(id).await
    }

    async fn save_job_status(&self, _input: &CreateJobStatus) -> AppResult<JobStatus> {
        Err(AppError::Database("job_statuses table unavailable".to_string()))
    }

    async fn jobs_summary(&self) -> AppResult<JobsSummary> {
        self.inner.jobs_summary().await
    }
}
