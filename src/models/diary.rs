use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DiaryEntry {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Rejects access to an entry owned by someone else.
    pub fn ensure_owned_by(&self, user_id: i64) -> AppResult<()> {
        if self.user_id != user_id {
            tracing::warn!(diary_id = self.id, user_id, "Cross-user diary access rejected");
            return Err(AppError::Forbidden("Unauthorized".to_string()));
        }
        Ok(())
    }
}
