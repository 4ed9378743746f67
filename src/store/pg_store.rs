use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::error::AppResult;
use crate::models::{CreateJobStatus, Diff, JobStatus, JobsSummary};
use crate::repositories::{DiffRepository, JobStatusRepository};
use crate::store::DiffStore;

/// PostgreSQL-backed store (SeaORM)
#[derive(Clone)]
pub struct PgStore {
    db: DatabaseConnection,
}

impl PgStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiffStore for PgStore {
    async fn save_diff(&self, diff: &Diff) -> AppResult<Diff> {
        DiffRepository::create(&self.db, diff).await
    }

    async fn find_diff(&self, id: &str) -> AppResult<Option<Diff>> {
        DiffRepository::find_by_id(&self.db, id).await
    }

    async fn list_diff_ids(&self, category: &str) -> AppResult<Vec<String>> {
        DiffRepository::list_ids_by_category(&self.db, category).await
    }

    async fn delete_diff(&self, id: &str) -> AppResult<()> {
        DiffRepository::delete(&self.db, id).await
    }

    async fn save_job_status(&self, input: &CreateJobStatus) -> AppResult<JobStatus> {
        JobStatusRepository::create(&self.db, input).await
    }

    async fn jobs_summary(&self) -> AppResult<JobsSummary> {
        JobStatusRepository::summary(&self.db).await
    }
}
