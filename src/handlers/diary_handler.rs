use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use std::sync::Arc;

use crate::{
    extractors::AuthenticatedUser,
    models::{CreateDiaryInput, DiaryEntry, DiaryMutationResponse, UpdateDiaryInput},
    AppError, AppResult, AppState,
};

/// Loads an entry and checks that the caller owns it
async fn find_owned_entry(
    state: &AppState,
    entry_id: i64,
    auth: &AuthenticatedUser,
) -> AppResult<DiaryEntry> {
    let entry = sqlx::query_as::<_, DiaryEntry>(r#"SELECT * FROM diaries WHERE id = $1"#)
        .bind(entry_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Diary entry {} not found", entry_id)))?;

    entry.ensure_owned_by(auth.user_id)?;

    Ok(entry)
}

/// GET /api/diaries
#[utoipa::path(
    get,
    path = "/api/diaries",
    responses(
        (status = 200, description = "Diary entries of the caller, newest date first", body = Vec<DiaryEntry>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn list_diaries(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
) -> AppResult<Json<Vec<DiaryEntry>>> {
    let entries = sqlx::query_as::<_, DiaryEntry>(
        r#"SELECT * FROM diaries WHERE user_id = $1 ORDER BY date DESC, id DESC"#,
    )
    .bind(auth.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

/// POST /api/diaries - Create a new diary entry
#[utoipa::path(
    post,
    path = "/api/diaries",
    request_body = CreateDiaryInput,
    responses(
        (status = 201, description = "Diary entry created successfully", body = DiaryEntry),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Missing title, content or date")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn create_diary(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(input): Json<CreateDiaryInput>,
) -> AppResult<(StatusCode, Json<DiaryEntry>)> {
    let fields = input.validate()?;

    let entry = sqlx::query_as::<_, DiaryEntry>(
        r#"
        INSERT INTO diaries (user_id, title, content, date)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(auth.user_id)
    .bind(&fields.title)
    .bind(&fields.content)
    .bind(fields.date)
    .fetch_one(&state.db)
    .await?;

    counter!("diary_entries_created_total").increment(1);
    tracing::info!(diary_id = entry.id, user_id = auth.user_id, "Diary entry created");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/diaries/{id}
#[utoipa::path(
    get,
    path = "/api/diaries/{id}",
    params(
        ("id" = i64, Path, description = "Diary entry ID")
    ),
    responses(
        (status = 200, description = "Diary entry", body = DiaryEntry),
        (status = 403, description = "Entry belongs to another user"),
        (status = 404, description = "Diary entry not found")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn get_diary(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<i64>,
    auth: AuthenticatedUser,
) -> AppResult<Json<DiaryEntry>> {
    let entry = find_owned_entry(&state, entry_id, &auth).await?;

    Ok(Json(entry))
}

/// PUT /api/diaries/{id} - Update a diary entry
#[utoipa::path(
    put,
    path = "/api/diaries/{id}",
    params(
        ("id" = i64, Path, description = "Diary entry ID")
    ),
    request_body = UpdateDiaryInput,
    responses(
        (status = 200, description = "Diary entry updated successfully", body = DiaryEntry),
        (status = 403, description = "Entry belongs to another user"),
        (status = 404, description = "Diary entry not found"),
        (status = 422, description = "Invalid title")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn update_diary(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<i64>,
    auth: AuthenticatedUser,
    Json(input): Json<UpdateDiaryInput>,
) -> AppResult<Json<DiaryEntry>> {
    find_owned_entry(&state, entry_id, &auth).await?;

    input.validate()?;

    let entry = sqlx::query_as::<_, DiaryEntry>(
        r#"
        UPDATE diaries
        SET title = COALESCE($1, title),
            content = COALESCE($2, content),
            date = COALESCE($3, date),
            updated_at = now()
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(input.title.as_deref())
    .bind(input.content.as_deref())
    .bind(input.date)
    .bind(entry_id)
    .bind(auth.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Diary entry {} not found", entry_id)))?;

    tracing::debug!(diary_id = entry.id, user_id = auth.user_id, "Diary entry updated");

    Ok(Json(entry))
}

/// DELETE /api/diaries/{id} - Delete a diary entry
#[utoipa::path(
    delete,
    path = "/api/diaries/{id}",
    params(
        ("id" = i64, Path, description = "Diary entry ID")
    ),
    responses(
        (status = 200, description = "Diary entry deleted successfully", body = DiaryMutationResponse),
        (status = 403, description = "Entry belongs to another user"),
        (status = 404, description = "Diary entry not found")
    ),
    tag = "diary",
    security(("bearer_auth" = []))
)]
pub async fn delete_diary(
    State(state): State<Arc<AppState>>,
    Path(entry_id): Path<i64>,
    auth: AuthenticatedUser,
) -> AppResult<Json<DiaryMutationResponse>> {
    find_owned_entry(&state, entry_id, &auth).await?;

    let result = sqlx::query(r#"DELETE FROM diaries WHERE id = $1 AND user_id = $2"#)
        .bind(entry_id)
        .bind(auth.user_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Diary entry {} not found",
            entry_id
        )));
    }

    counter!("diary_entries_deleted_total").increment(1);
    tracing::info!(diary_id = entry_id, user_id = auth.user_id, "Diary entry deleted");

    Ok(Json(DiaryMutationResponse {
        success: true,
        message: Some("Diary entry deleted".to_string()),
    }))
}
