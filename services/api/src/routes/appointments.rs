//! Appointment handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use practice::{models::NewAppointment, search::retain_matching};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
    models::ListQuery,
    state::AppState,
    validation::validate_new_appointment,
};

use super::deleted;

/// List the owner's appointments, earliest start first
pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut appointments = state
        .appointment_repository
        .list(owner.id)
        .await
        .map_err(internal("Failed to list appointments"))?;

    if let Some(search) = query.search.as_deref() {
        retain_matching(&mut appointments, search);
    }

    Ok(Json(appointments))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let appointment = state
        .appointment_repository
        .get(owner.id, id)
        .await
        .map_err(internal("Failed to get appointment"))?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".to_string()))?;

    Ok(Json(appointment))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewAppointment>,
) -> ApiResult<impl IntoResponse> {
    validate_new_appointment(&payload).map_err(ApiError::BadRequest)?;

    let appointment = state
        .appointment_repository
        .create(owner.id, &payload)
        .await
        .map_err(internal("Failed to create appointment"))?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NewAppointment>,
) -> ApiResult<impl IntoResponse> {
    validate_new_appointment(&payload).map_err(ApiError::BadRequest)?;

    let appointment = state
        .appointment_repository
        .update(owner.id, id, &payload)
        .await
        .map_err(internal("Failed to update appointment"))?
        .ok_or_else(|| ApiError::NotFound("Appointment not found".to_string()))?;

    Ok(Json(appointment))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let removed = state
        .appointment_repository
        .delete(owner.id, id)
        .await
        .map_err(internal("Failed to delete appointment"))?;

    if removed {
        Ok(deleted("Appointment"))
    } else {
        Err(ApiError::NotFound("Appointment not found".to_string()))
    }
}
