use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[param(default = 20, minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    #[param(default = 0, minimum = 0)]
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)`
    pub fn resolve(&self) -> (u64, u64) {
        let limit = self.limit.unwrap_or(20).clamp(1, 100) as u64;
        let offset = self.offset.unwrap_or(0).max(0) as u64;
        (limit, offset)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TitleQuery {
    /// Case-insensitive substring; empty matches everything
    #[serde(default)]
    pub title: String,
}

/// Reject blank values and values longer than `max` characters
pub fn validate_required(value: &str, field: &str, max: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }

    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
