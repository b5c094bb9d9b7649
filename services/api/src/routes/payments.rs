//! Payment handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use practice::{aggregates::PaymentSummary, models::NewPayment, search::retain_matching};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::{ApiJson, ApiPath, ApiQuery},
    middleware::AuthUser,
    models::ListQuery,
    state::AppState,
    validation::validate_new_payment,
};

use super::deleted;

/// List the owner's payments, latest payment date first
pub async fn list(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut payments = state
        .payment_repository
        .list(owner.id)
        .await
        .map_err(internal("Failed to list payments"))?;

    if let Some(search) = query.search.as_deref() {
        retain_matching(&mut payments, search);
    }

    Ok(Json(payments))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let payment = state
        .payment_repository
        .get(owner.id, id)
        .await
        .map_err(internal("Failed to get payment"))?
        .ok_or_else(|| ApiError::NotFound("Payment not found".to_string()))?;

    Ok(Json(payment))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewPayment>,
) -> ApiResult<impl IntoResponse> {
    validate_new_payment(&payload).map_err(ApiError::BadRequest)?;

    let payment = state
        .payment_repository
        .create(owner.id, &payload)
        .await
        .map_err(internal("Failed to create payment"))?;

    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NewPayment>,
) -> ApiResult<impl IntoResponse> {
    validate_new_payment(&payload).map_err(ApiError::BadRequest)?;

    let payment = state
        .payment_repository
        .update(owner.id, id, &payload)
        .await
        .map_err(internal("Failed to update payment"))?
        .ok_or_else(|| ApiError::NotFound("Payment not found".to_string()))?;

    Ok(Json(payment))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let removed = state
        .payment_repository
        .delete(owner.id, id)
        .await
        .map_err(internal("Failed to delete payment"))?;

    if removed {
        Ok(deleted("Payment"))
    } else {
        Err(ApiError::NotFound("Payment not found".to_string()))
    }
}

/// Revenue and status counts over all of the owner's payments
pub async fn summary(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let payments = state
        .payment_repository
        .list(owner.id)
        .await
        .map_err(internal("Failed to list payments"))?;

    Ok(Json(PaymentSummary::from_payments(&payments)))
}
