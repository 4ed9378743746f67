use crate::error::{AppError, AppResult};

/// Reject absent or blank query parameters with a 400
pub fn require_param<'a>(value: &'a Option<String>, name: &str) -> AppResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} parameter is required", name))),
    }
}
