use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::models::{CreateJobStatus, Diff, JobResult, JobStatus, JobsSummary, DELETED_DIFFS};
use crate::store::DiffStore;

/// In-memory store for tests and local dry runs
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryStoreInner>>,
}

#[derive(Default)]
struct InMemoryStoreInner {
    // Insertion order is kept so timestamp ties resolve newest-inserted first
    diffs: Vec<Diff>,
    job_statuses: Vec<JobStatus>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded job statuses, oldest first
    pub async fn job_statuses(&self) -> Vec<JobStatus> {
        self.inner.lock().await.job_statuses.clone()
    }

    /// All stored diffs, oldest first
    pub async fn diffs(&self) -> Vec<Diff> {
        self.inner.lock().await.diffs.clone()
    }
}

#[async_trait]
impl DiffStore for InMemoryStore {
    async fn save_diff(&self, diff: &Diff) -> AppResult<Diff> {
        let mut inner = self.inner.lock().await;
        if inner.diffs.iter().any(|d| d.id == diff.id) {
            return Err(AppError::Database(format!("duplicate diff id {}", diff.id)));
        }
        inner.diffs.push(diff.clone());
        Ok(diff.clone())
    }

    async fn find_diff(&self, id: &str) -> AppResult<Option<Diff>> {
        let inner = self.inner.lock().await;
        Ok(inner.diffs.iter().find(|d| d.id == id).cloned())
    }

    async fn list_diff_ids(&self, category: &str) -> AppResult<Vec<String>> {
        let inner = self.inner.lock().await;

        let mut matching: Vec<&Diff> = inner
            .diffs
            .iter()
            .rev()
            .filter(|d| category == DELETED_DIFFS || d.category == category)
            .collect();
        // Stable sort keeps reverse insertion order among equal timestamps
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(matching.into_iter().map(|d| d.id.clone()).collect())
    }

    async fn delete_diff(&self, id: &str) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        let before = inner.diffs.len();
        inner.diffs.retain(|d| d.id != id);

        if inner.diffs.len() == before {
            return Err(AppError::NotFound(format!("Diff with id '{}'", id)));
        }

        Ok(())
    }

    async fn save_job_status(&self, input: &CreateJobStatus) -> AppResult<JobStatus> {
        let mut inner = self.inner.lock().await;
        if inner.job_statuses.iter().any(|j| j.job_id == input.job_id) {
            return Err(AppError::Database(format!(
                "duplicate job id {}",
                input.job_id
            )));
        }

        let status = JobStatus {
            id: inner.job_statuses.len() as i32 + 1,
            job_id: input.job_id.clone(),
            result: input.result,
            executed_at: time::OffsetDateTime::now_utc(),
            error_message: input.error_message.clone(),
        };
        inner.job_statuses.push(status.clone());

        Ok(status)
    }

    async fn jobs_summary(&self) -> AppResult<JobsSummary> {
        let inner = self.inner.lock().await;
        let count = |result: JobResult| {
            inner
                .job_statuses
                .iter()
                .filter(|j| j.result == result)
                .count() as u64
        };

        Ok(JobsSummary {
            failed_diffs: count(JobResult::SuccessWithDiff),
            successed_diffs: count(JobResult::SuccessNoDiff),
            failed_jobs: count(JobResult::Failed),
            job_counter: inner.job_statuses.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn diff(id: &str, category: &str, timestamp: time::OffsetDateTime) -> Diff {
        Diff {
            id: id.to_string(),
            category: category.to_string(),
            job_id: format!("job-{}", id),
            job_name: "GET /api/test".to_string(),
            timestamp,
            diff_type: "status_code".to_string(),
            prod_normalized_response: "200".to_string(),
            integ_normalized_response: "503".to_string(),
            prod_ignored_fields: None,
            integ_ignored_fields: None,
            prod_curl_request: String::new(),
            integ_curl_request: String::new(),
            metadata: None,
            old_value: "200".to_string(),
            new_value: "503".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_diff_ids_filters_and_orders_newest_first() {
        let store = InMemoryStore::new();

        store
            .save_diff(&diff("a", "status_code", datetime!(2025-01-01 10:00 UTC)))
            .await
            .unwrap();
        store
            .save_diff(&diff("b", "json_response", datetime!(2025-01-01 11:00 UTC)))
            .await
            .unwrap();
        store
            .save_diff(&diff("c", "status_code", datetime!(2025-01-01 12:00 UTC)))
            .await
            .unwrap();

        let ids = store.list_diff_ids("status_code").await.unwrap();
        assert_eq!(ids, vec!["c", "a"]);

        let all = store.list_diff_ids(DELETED_DIFFS).await.unwrap();
        assert_eq!(all, vec!["c", "b", "a"]);

        assert!(store.list_diff_ids("headers").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_equal_timestamps_resolve_to_latest_insert() {
        let store = InMemoryStore::new();
        let at = datetime!(2025-01-01 10:00 UTC);

        store.save_diff(&diff("first", "status_code", at)).await.unwrap();
        store.save_diff(&diff("second", "status_code", at)).await.unwrap();

        let ids = store.list_diff_ids("status_code").await.unwrap();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_delete_diff() {
        let store = InMemoryStore::new();
        store
            .save_diff(&diff("a", "status_code", datetime!(2025-01-01 10:00 UTC)))
            .await
            .unwrap();

        store.delete_diff("a").await.unwrap();
        assert!(store.find_diff("a").await.unwrap().is_none());

        let result = store.delete_diff("a").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_jobs_summary_counts_by_result() {
        let store = InMemoryStore::new();

        let results = [
            JobResult::SuccessNoDiff,
            JobResult::SuccessNoDiff,
            JobResult::SuccessWithDiff,
            JobResult::Failed,
        ];
        for (i, result) in results.into_iter().enumerate() {
            store
                .save_job_status(&CreateJobStatus {
                    job_id: format!("job-{}", i),
                    result,
                    error_message: None,
                })
                .await
                .unwrap();
        }

        let summary = store.jobs_summary().await.unwrap();
        assert_eq!(summary.successed_diffs, 2);
        assert_eq!(summary.failed_diffs, 1);
        assert_eq!(summary.failed_jobs, 1);
        assert_eq!(summary.job_counter, 4);
    }

    #[tokio::test]
    async fn test_duplicate_job_id_rejected() {
        let store = InMemoryStore::new();
        let input = CreateJobStatus {
            job_id: "job-1".to_string(),
            result: JobResult::Failed,
            error_message: Some("boom".to_string()),
        };

        store.save_job_status(&input).await.unwrap();
        assert!(store.save_job_status(&input).await.is_err());
    }
}
