//! Package handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use practice::{models::NewPackage, search::retain_matching};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
    models::ListQuery,
    state::AppState,
    validation::validate_new_package,
};

use super::deleted;

pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut packages = state
        .package_repository
        .list(owner.id)
        .await
        .map_err(internal("Failed to list packages"))?;

    if let Some(search) = query.search.as_deref() {
        retain_matching(&mut packages, search);
    }

    Ok(Json(packages))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let package = state
        .package_repository
        .get(owner.id, id)
        .await
        .map_err(internal("Failed to get package"))?
        .ok_or_else(|| ApiError::NotFound("Package not found".to_string()))?;

    Ok(Json(package))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewPackage>,
) -> ApiResult<impl IntoResponse> {
    validate_new_package(&payload).map_err(ApiError::BadRequest)?;

    let package = state
        .package_repository
        .create(owner.id, &payload)
        .await
        .map_err(internal("Failed to create package"))?;

    Ok((StatusCode::CREATED, Json(package)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NewPackage>,
) -> ApiResult<impl IntoResponse> {
    validate_new_package(&payload).map_err(ApiError::BadRequest)?;

    let package = state
        .package_repository
        .update(owner.id, id, &payload)
        .await
        .map_err(internal("Failed to update package"))?
        .ok_or_else(|| ApiError::NotFound("Package not found".to_string()))?;

    Ok(Json(package))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let removed = state
        .package_repository
        .delete(owner.id, id)
        .await
        .map_err(internal("Failed to delete package"))?;

    if removed {
        Ok(deleted("Package"))
    } else {
        Err(ApiError::NotFound("Package not found".to_string()))
    }
}
