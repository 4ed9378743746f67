use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entity::job_status::{self, ActiveModel, Column, Entity as JobStatusEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateJobStatus, JobResult, JobStatus, JobsSummary};

/// Job status repository for database operations
pub struct JobStatusRepository;

impl JobStatusRepository {
    /// Append a job status row
    pub async fn create(db: &DatabaseConnection, input: &CreateJobStatus) -> AppResult<JobStatus> {
        let model = ActiveModel {
            id: NotSet,
            job_id: Set(input.job_id.clone()),
            result: Set(input.result.as_i16()),
            executed_at: Set(time::OffsetDateTime::now_utc()),
            error_message: Set(input.error_message.clone()),
        };

        let result = model.insert(db).await?;
        result.try_into()
    }

    /// Count job statuses with the given result
    pub async fn count_by_result(db: &DatabaseConnection, result: JobResult) -> AppResult<u64> {
        let count = JobStatusEntity::find()
            .filter(Column::Result.eq(result.as_i16()))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Count total job statuses
    pub async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = JobStatusEntity::find().count(db).await?;
        Ok(count)
    }

    /// Aggregate counts for the dashboard
    pub async fn summary(db: &DatabaseConnection) -> AppResult<JobsSummary> {
        Ok(JobsSummary {
            failed_diffs: Self::count_by_result(db, JobResult::SuccessWithDiff).await?,
            successed_diffs: Self::count_by_result(db, JobResult::SuccessNoDiff).await?,
            failed_jobs: Self::count_by_result(db, JobResult::Failed).await?,
            job_counter: Self::count(db).await?,
        })
    }
}

impl TryFrom<job_status::Model> for JobStatus {
    type Error = AppError;

    fn try_from(m: job_status::Model) -> Result<Self, Self::Error> {
        let result = JobResult::from_i16(m.result).ok_or_else(|| {
            AppError::Database(format!("Unknown job result {} for job {}", m.result, m.job_id))
        })?;

        Ok(Self {
            id: m.id,
            job_id: m.job_id,
            result,
            executed_at: m.executed_at,
            error_message: m.error_message,
        })
    }
}
