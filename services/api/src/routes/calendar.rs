//! Calendar view

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use practice::calendar::{CalendarCursor, build_grid, fixed_time_slots};
use tracing::debug;

use crate::{
    error::{ApiError, ApiResult, internal},
    extract::ApiQuery,
    middleware::AuthUser,
    models::{CalendarQuery, CalendarResponse},
    state::AppState,
};

use super::owner_context;

/// Years the calendar can be opened at; the store's timestamps cover this range
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn check_supported(date: NaiveDate) -> ApiResult<()> {
    if SUPPORTED_YEARS.contains(&date.year()) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!("Date out of range: {}", date)))
    }
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// UTC range to load for `dates`. Local days can begin up to a day before or
/// after the UTC one; the grid does the exact per-day match.
fn fetch_window(dates: &[NaiveDate]) -> ApiResult<(DateTime<Utc>, DateTime<Utc>)> {
    let from = dates
        .first()
        .and_then(|first| first.checked_sub_days(Days::new(1)));
    let to = dates
        .last()
        .and_then(|last| last.checked_add_days(Days::new(2)));

    match (from, to) {
        (Some(from), Some(to)) => Ok((utc_midnight(from), utc_midnight(to))),
        _ => Err(ApiError::BadRequest("Date out of range".to_string())),
    }
}

/// Grid of the requested week or day, in the owner's timezone
pub async fn show(
    State(state): State<AppState>,
    Extension(owner): Extension<AuthUser>,
    ApiQuery(query): ApiQuery<CalendarQuery>,
) -> ApiResult<Response> {
    if let Some(date) = query.date {
        check_supported(date)?;
    }

    let ctx = owner_context(&state, owner.id).await?;
    let reference = query.date.unwrap_or_else(|| ctx.today(Utc::now()));
    let cursor = CalendarCursor::new(reference, query.view.unwrap_or_default());

    let (from, to) = fetch_window(&cursor.visible_dates())?;
    debug!("Loading calendar for {} between {} and {}", owner.id, from, to);

    let appointments = state
        .appointment_repository
        .list_between(owner.id, from, to)
        .await
        .map_err(internal("Failed to load calendar appointments"))?;

    let mut previous = cursor;
    previous.previous();
    let mut next = cursor;
    next.next();

    let slots = fixed_time_slots();
    let response = CalendarResponse {
        grid: build_grid(&cursor, &slots, &appointments, &ctx),
        previous: previous.reference,
        next: next.reference,
        timezone: ctx.timezone.name().to_string(),
    };

    // The grid borrows `appointments`, so serialize before leaving the handler
    Ok(Json(response).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_pads_a_day_before_and_after() {
        let (from, to) = fetch_window(&[date(2024, 5, 6), date(2024, 5, 12)]).unwrap();
        assert_eq!(from, utc_midnight(date(2024, 5, 5)));
        assert_eq!(to, utc_midnight(date(2024, 5, 14)));
    }

    #[test]
    fn window_at_the_ends_of_the_date_range_is_a_bad_request() {
        assert!(matches!(
            fetch_window(&[NaiveDate::MAX]),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(
            fetch_window(&[NaiveDate::MIN]),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(fetch_window(&[]), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn only_four_digit_years_are_supported() {
        assert!(check_supported(date(2024, 5, 6)).is_ok());
        assert!(check_supported(date(9999, 12, 31)).is_ok());
        assert!(check_supported(NaiveDate::MAX).is_err());
        assert!(check_supported(date(0, 1, 1)).is_err());
    }
}
