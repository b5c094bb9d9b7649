//! Session note handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use practice::{models::NewSessionNote, search::retain_matching};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
    models::ListQuery,
    state::AppState,
    validation::validate_new_session_note,
};

use super::deleted;

/// List the owner's notes, most recent session first
pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut notes = state
        .session_note_repository
        .list(owner.id)
        .await
        .map_err(internal("Failed to list session notes"))?;

    if let Some(search) = query.search.as_deref() {
        retain_matching(&mut notes, search);
    }

    Ok(Json(notes))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let session_note = state
        .session_note_repository
        .get(owner.id, id)
        .await
        .map_err(internal("Failed to get session note"))?
        .ok_or_else(|| ApiError::NotFound("Session note not found".to_string()))?;

    Ok(Json(session_note))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewSessionNote>,
) -> ApiResult<impl IntoResponse> {
    validate_new_session_note(&payload).map_err(ApiError::BadRequest)?;

    let session_note = state
        .session_note_repository
        .create(owner.id, &payload)
        .await
        .map_err(internal("Failed to create session note"))?;

    Ok((StatusCode::CREATED, Json(session_note)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NewSessionNote>,
) -> ApiResult<impl IntoResponse> {
    validate_new_session_note(&payload).map_err(ApiError::BadRequest)?;

    let session_note = state
        .session_note_repository
        .update(owner.id, id, &payload)
        .await
        .map_err(internal("Failed to update session note"))?
        .ok_or_else(|| ApiError::NotFound("Session note not found".to_string()))?;

    Ok(Json(session_note))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let removed = state
        .session_note_repository
        .delete(owner.id, id)
        .await
        .map_err(internal("Failed to delete session note"))?;

    if removed {
        Ok(deleted("Session note"))
    } else {
        Err(ApiError::NotFound("Session note not found".to_string()))
    }
}
