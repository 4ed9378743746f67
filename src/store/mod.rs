pub mod memory_store;
pub mod pg_store;

pub use memory_store::InMemoryStore;
pub use pg_store::PgStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{CreateJobStatus, Diff, JobStatus, JobsSummary};

/// Persistence backend for diffs and job outcomes.
/// Both tables are append-only apart from the explicit diff delete path.
#[async_trait]
pub trait DiffStore: Send + Sync {
    /// Persist a newly detected diff
    async fn save_diff(&self, diff: &Diff) -> AppResult<Diff>;

    /// Get a diff by ID
    async fn find_diff(&self, id: &str) -> AppResult<Option<Diff>>;

    /// Diff IDs in the given category, newest first
    async fn list_diff_ids(&self, category: &str) -> AppResult<Vec<String>>;

    /// Remove a diff
    async fn delete_diff(&self, id: &str) -> AppResult<()>;

    /// Append the outcome of one comparison attempt
    async fn save_job_status(&self, input: &CreateJobStatus) -> AppResult<JobStatus>;

    /// Aggregate counts over all job statuses
    async fn jobs_summary(&self) -> AppResult<JobsSummary>;
}
