use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Outcome of one endpoint comparison attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobResult {
    /// Responses are identical
    SuccessNoDiff,
    /// Comparison ran and found a difference
    SuccessWithDiff,
    /// Comparison could not run (network error, timeout, missing config)
    Failed,
}

impl JobResult {
    pub fn as_i16(&self) -> i16 {
        match self {
            Self::SuccessNoDiff => 0,
            Self::SuccessWithDiff => 1,
            Self::Failed => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::SuccessNoDiff),
            1 => Some(Self::SuccessWithDiff),
            2 => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: i32,
    pub job_id: String,
    pub result: JobResult,
    pub executed_at: OffsetDateTime,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobStatus {
    pub job_id: String,
    pub result: JobResult,
    pub error_message: Option<String>,
}

/// Aggregate counts over all recorded job statuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsSummary {
    /// Comparisons that found a difference
    pub failed_diffs: u64,
    /// Comparisons that found no difference
    pub successed_diffs: u64,
    pub failed_jobs: u64,
    pub job_counter: u64,
}
