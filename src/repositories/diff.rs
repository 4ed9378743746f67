use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::diff::{self, ActiveModel, Column, Entity as DiffEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Diff, DiffMetadata, DELETED_DIFFS};

/// Diff repository for database operations
pub struct DiffRepository;

impl DiffRepository {
    /// Persist a new diff
    pub async fn create(db: &DatabaseConnection, input: &Diff) -> AppResult<Diff> {
        let model = ActiveModel {
            id: Set(input.id.clone()),
            category: Set(input.category.clone()),
            job_id: Set(input.job_id.clone()),
            job_name: Set(input.job_name.clone()),
            timestamp: Set(input.timestamp),
            diff_type: Set(input.diff_type.clone()),
            prod_normalized_response: Set(input.prod_normalized_response.clone()),
            integ_normalized_response: Set(input.integ_normalized_response.clone()),
            prod_ignored_fields: Set(to_json(&input.prod_ignored_fields)?),
            integ_ignored_fields: Set(to_json(&input.integ_ignored_fields)?),
            prod_curl_request: Set(input.prod_curl_request.clone()),
            integ_curl_request: Set(input.integ_curl_request.clone()),
            metadata: Set(to_json(&input.metadata)?),
            old_value: Set(input.old_value.clone()),
            new_value: Set(input.new_value.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Find a diff by ID
    pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> AppResult<Option<Diff>> {
        let model = DiffEntity::find_by_id(id.to_string()).one(db).await?;
        Ok(model.map(Into::into))
    }

    /// List diff IDs, newest first, filtered by category unless the
    /// dashboard's `deleted_diffs` pseudo-category is requested
    pub async fn list_ids_by_category(
        db: &DatabaseConnection,
        category: &str,
    ) -> AppResult<Vec<String>> {
        let mut query = DiffEntity::find().select_only().column(Column::Id);

        if category != DELETED_DIFFS {
            query = query.filter(Column::Category.eq(category));
        }

        let ids = query
            .order_by_desc(Column::Timestamp)
            .order_by_desc(Column::CreatedAt)
            .into_tuple::<String>()
            .all(db)
            .await?;

        Ok(ids)
    }

    /// Delete a diff by ID
    pub async fn delete(db: &DatabaseConnection, id: &str) -> AppResult<()> {
        let result = DiffEntity::delete_by_id(id.to_string()).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Diff with id '{}'", id)));
        }

        Ok(())
    }
}

fn to_json<T: serde::Serialize>(value: &Option<T>) -> AppResult<Option<serde_json::Value>> {
    value
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(AppError::from)
}

// Conversion from SeaORM model to our domain model.
// Unreadable JSON columns degrade to None rather than hiding the diff.
impl From<diff::Model> for Diff {
    fn from(m: diff::Model) -> Self {
        let metadata = m.metadata.and_then(|raw| {
            serde_json::from_value::<DiffMetadata>(raw)
                .map_err(|e| tracing::warn!(diff_id = %m.id, error = %e, "Failed to read diff metadata"))
                .ok()
        });

        Self {
            prod_ignored_fields: m
                .prod_ignored_fields
                .and_then(|raw| serde_json::from_value(raw).ok()),
            integ_ignored_fields: m
                .integ_ignored_fields
                .and_then(|raw| serde_json::from_value(raw).ok()),
            metadata,
            id: m.id,
            category: m.category,
            job_id: m.job_id,
            job_name: m.job_name,
            timestamp: m.timestamp,
            diff_type: m.diff_type,
            prod_normalized_response: m.prod_normalized_response,
            integ_normalized_response: m.integ_normalized_response,
            prod_curl_request: m.prod_curl_request,
            integ_curl_request: m.integ_curl_request,
            old_value: m.old_value,
            new_value: m.new_value,
        }
    }
}
