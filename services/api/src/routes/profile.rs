//! Owner profile handlers

use axum::{Extension, Json, extract::State, response::IntoResponse};
use practice::models::UpdateProfile;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::ApiJson,
    middleware::AuthUser,
    state::AppState,
    validation::validate_email,
};

pub async fn get(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .profile_repository
        .get(owner.id)
        .await
        .map_err(internal("Failed to get profile"))?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile))
}

/// Create or replace the owner's profile
pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiJson(payload): ApiJson<UpdateProfile>,
) -> ApiResult<impl IntoResponse> {
    if let Some(email) = payload.email.as_deref().filter(|e| !e.is_empty()) {
        validate_email(email).map_err(ApiError::BadRequest)?;
    }

    // Reject unknown zones here; stored values are resolved leniently
    if let Some(zone) = payload
        .timezone
        .as_deref()
        .filter(|zone| zone.parse::<chrono_tz::Tz>().is_err())
    {
        return Err(ApiError::BadRequest(format!("Unknown timezone: {}", zone)));
    }

    let profile = state
        .profile_repository
        .upsert(owner.id, &payload)
        .await
        .map_err(internal("Failed to save profile"))?;

    Ok(Json(profile))
}
