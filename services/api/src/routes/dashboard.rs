//! Dashboard summary

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::Utc;
use practice::aggregates::DashboardSummary;

use crate::{
    error::{ApiResult, internal},
    middleware::AuthUser,
    state::AppState,
};

use super::owner_context;

pub async fn show(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let ctx = owner_context(&state, owner.id).await?;

    let (clients, appointments, payments) = tokio::try_join!(
        state.client_repository.list(owner.id),
        state.appointment_repository.list(owner.id),
        state.payment_repository.list(owner.id),
    )
    .map_err(internal("Failed to load dashboard data"))?;

    Ok(Json(DashboardSummary::compute(
        &clients,
        &appointments,
        &payments,
        &ctx,
        Utc::now(),
    )))
}
