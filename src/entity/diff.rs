use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "diffs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category: String,
    pub job_id: String,
    pub job_name: String,
    pub timestamp: TimeDateTimeWithTimeZone,
    pub diff_type: String,
    #[sea_orm(column_type = "Text")]
    pub prod_normalized_response: String,
    #[sea_orm(column_type = "Text")]
    pub integ_normalized_response: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub prod_ignored_fields: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub integ_ignored_fields: Option<Json>,
    #[sea_orm(column_type = "Text")]
    pub prod_curl_request: String,
    #[sea_orm(column_type = "Text")]
    pub integ_curl_request: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    #[sea_orm(column_type = "Text")]
    pub old_value: String,
    #[sea_orm(column_type = "Text")]
    pub new_value: String,
    pub created_at: TimeDateTimeWithTimeZone,
}

// job_id correlates with job_statuses.job_id but is not a foreign key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
