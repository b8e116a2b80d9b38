use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{AppError, AppResult};

pub const TITLE_MAX_CHARS: usize = 255;

/// Validated `{title, content, date}` body. Also the wire body the client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiaryFields {
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

/// Input for creating a diary entry
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateDiaryInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<NaiveDate>,
}

impl CreateDiaryInput {
    pub fn validate(self) -> AppResult<DiaryFields> {
        let title = self
            .title
            .ok_or_else(|| AppError::Validation("The title field is required.".to_string()))?;
        validate_title(&title)?;

        let content = self
            .content
            .ok_or_else(|| AppError::Validation("The content field is required.".to_string()))?;

        let date = self
            .date
            .ok_or_else(|| AppError::Validation("The date field is required.".to_string()))?;

        Ok(DiaryFields { title, content, date })
    }
}

/// Input for updating a diary entry; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDiaryInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<NaiveDate>,
}

impl UpdateDiaryInput {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("The title field is required.".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "The title may not be greater than {} characters.",
            TITLE_MAX_CHARS
        )));
    }
    Ok(())
}

/// Response for diary mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiaryMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}
