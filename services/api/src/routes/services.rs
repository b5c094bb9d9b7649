//! Service handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use practice::{models::NewService, search::retain_matching};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
    models::ListQuery,
    state::AppState,
    validation::validate_new_service,
};

use super::deleted;

/// List the owner's services, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut services = state
        .service_repository
        .list(owner.id)
        .await
        .map_err(internal("Failed to list services"))?;

    if let Some(search) = query.search.as_deref() {
        retain_matching(&mut services, search);
    }

    Ok(Json(services))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let service = state
        .service_repository
        .get(owner.id, id)
        .await
        .map_err(internal("Failed to get service"))?
        .ok_or_else(|| ApiError::NotFound("Service not found".to_string()))?;

    Ok(Json(service))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewService>,
) -> ApiResult<impl IntoResponse> {
    validate_new_service(&payload).map_err(ApiError::BadRequest)?;

    let service = state
        .service_repository
        .create(owner.id, &payload)
        .await
        .map_err(internal("Failed to create service"))?;

    Ok((StatusCode::CREATED, Json(service)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NewService>,
) -> ApiResult<impl IntoResponse> {
    validate_new_service(&payload).map_err(ApiError::BadRequest)?;

    let service = state
        .service_repository
        .update(owner.id, id, &payload)
        .await
        .map_err(internal("Failed to update service"))?
        .ok_or_else(|| ApiError::NotFound("Service not found".to_string()))?;

    Ok(Json(service))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let removed = state
        .service_repository
        .delete(owner.id, id)
        .await
        .map_err(internal("Failed to delete service"))?;

    if removed {
        Ok(deleted("Service"))
    } else {
        Err(ApiError::NotFound("Service not found".to_string()))
    }
}
