use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Pseudo-category the dashboard uses for its client-side trash view.
/// Has no server-side meaning beyond "every diff".
pub const DELETED_DIFFS: &str = "deleted_diffs";

/// Classification stored in the `category` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffCategory {
    StatusCode,
    JsonResponse,
}

impl DiffCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusCode => "status_code",
            Self::JsonResponse => "json_response",
        }
    }

    pub fn diff_type(&self) -> DiffType {
        match self {
            Self::StatusCode => DiffType::StatusCode,
            Self::JsonResponse => DiffType::Body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    StatusCode,
    Body,
}

impl DiffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusCode => "status_code",
            Self::Body => "body",
        }
    }
}

/// Request context captured alongside a diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiffMetadata {
    pub endpoint: Option<String>,
    pub method: Option<String>,
    /// Time spent fetching both sides, in milliseconds
    #[serde(rename = "duration")]
    pub duration_ms: Option<i64>,
}

/// A detected discrepancy between two environments for one endpoint call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    pub id: String,
    pub category: String,
    pub job_id: String,
    pub job_name: String,
    pub timestamp: OffsetDateTime,
    pub diff_type: String,
    pub prod_normalized_response: String,
    pub integ_normalized_response: String,
    // Reserved for field-level masking; nothing populates these yet
    pub prod_ignored_fields: Option<Vec<String>>,
    pub integ_ignored_fields: Option<Vec<String>>,
    pub prod_curl_request: String,
    pub integ_curl_request: String,
    pub metadata: Option<DiffMetadata>,

    // Legacy mirrors of the normalized values
    pub old_value: String,
    pub new_value: String,
}
