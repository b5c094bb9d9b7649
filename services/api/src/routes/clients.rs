//! Client handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use practice::{models::NewClient, search::retain_matching};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
    models::ListQuery,
    state::AppState,
    validation::validate_new_client,
};

use super::deleted;

/// List the owner's clients, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut clients = state
        .client_repository
        .list(owner.id)
        .await
        .map_err(internal("Failed to list clients"))?;

    if let Some(search) = query.search.as_deref() {
        retain_matching(&mut clients, search);
    }

    Ok(Json(clients))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let client = state
        .client_repository
        .get(owner.id, id)
        .await
        .map_err(internal("Failed to get client"))?
        .ok_or_else(|| ApiError::NotFound("Client not found".to_string()))?;

    Ok(Json(client))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewClient>,
) -> ApiResult<impl IntoResponse> {
    validate_new_client(&payload).map_err(ApiError::BadRequest)?;

    let client = state
        .client_repository
        .create(owner.id, &payload)
        .await
        .map_err(internal("Failed to create client"))?;

    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NewClient>,
) -> ApiResult<impl IntoResponse> {
    validate_new_client(&payload).map_err(ApiError::BadRequest)?;

    let client = state
        .client_repository
        .update(owner.id, id, &payload)
        .await
        .map_err(internal("Failed to update client"))?
        .ok_or_else(|| ApiError::NotFound("Client not found".to_string()))?;

    Ok(Json(client))
}

/// Delete a client; its appointments, notes and payments stay behind
pub async fn delete(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let removed = state
        .client_repository
        .delete(owner.id, id)
        .await
        .map_err(internal("Failed to delete client"))?;

    if removed {
        Ok(deleted("Client"))
    } else {
        Err(ApiError::NotFound("Client not found".to_string()))
    }
}
