//! Week view scenarios exercised through the public calendar API

use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use practice::{
    calendar::{
        CalendarContext, CalendarCursor, ViewMode, build_grid, fixed_time_slots, slots_for_day,
        week_dates,
    },
    models::{Appointment, AppointmentStatus, ClientName, NamedRef},
    search::filter_records,
};
use uuid::Uuid;

fn appointment(start: chrono::DateTime<Utc>, client: Option<ClientName>) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        service_id: None,
        title: "Wellness coaching".to_string(),
        description: None,
        start_time: start,
        end_time: start + TimeDelta::hours(1),
        status: AppointmentStatus::Confirmed,
        location: Some("Studio A".to_string()),
        notes: None,
        created_at: start,
        updated_at: start,
        client,
        service: Some(NamedRef {
            name: "Coaching".to_string(),
        }),
    }
}

#[test]
fn monday_quarter_past_nine_lands_in_the_nine_oclock_cell() {
    let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 15, 0).unwrap();
    let appointments = vec![appointment(
        start,
        Some(ClientName {
            first_name: "Sarah".to_string(),
            last_name: "Johnson".to_string(),
        }),
    )];

    assert_eq!(week_dates(monday)[0], monday);

    let cursor = CalendarCursor::new(monday, ViewMode::Week);
    let grid = build_grid(
        &cursor,
        &fixed_time_slots(),
        &appointments,
        &CalendarContext::default(),
    );

    assert_eq!(grid.dates[0], monday);
    let cell = grid.cell("9:00 AM", 0).expect("nine o'clock row exists");
    assert_eq!(cell.len(), 1);
    assert_eq!(cell[0].client_display_name(), "Sarah Johnson");
}

#[test]
fn appointment_of_a_deleted_client_still_renders() {
    let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 5, 6, 11, 0, 0).unwrap();
    // the joined client lookup comes back empty once the client row is gone
    let appointments = vec![appointment(start, None)];

    let day = slots_for_day(
        &fixed_time_slots(),
        &appointments,
        monday,
        &CalendarContext::default(),
    );

    let cell = day.get("11:00 AM").unwrap();
    assert_eq!(cell.len(), 1);
    assert!(cell[0].client.is_none());
    assert_eq!(cell[0].client_display_name(), "Unknown Client");

    // still searchable by title, never by the missing name
    assert_eq!(filter_records(&appointments, "coaching").len(), 1);
    assert!(filter_records(&appointments, "sarah").is_empty());
}

#[test]
fn paging_a_week_forward_shows_the_next_monday() {
    let mut cursor = CalendarCursor::new(NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(), ViewMode::Week);
    cursor.next();

    let dates = cursor.visible_dates();
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 5, 13).unwrap());
    assert_eq!(dates[6], NaiveDate::from_ymd_opt(2024, 5, 19).unwrap());
}

#[test]
fn grid_serializes_for_the_http_layer() {
    let monday = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
    let appointments = vec![appointment(start, None)];
    let cursor = CalendarCursor::new(monday, ViewMode::Day);

    let grid = build_grid(
        &cursor,
        &fixed_time_slots(),
        &appointments,
        &CalendarContext::default(),
    );
    let json = serde_json::to_value(&grid).unwrap();

    assert_eq!(json["view"], "day");
    assert_eq!(json["dates"][0], "2024-05-06");
    assert_eq!(json["rows"][1]["slot"]["label"], "9:00 AM");
    assert_eq!(json["rows"][1]["cells"][0][0]["status"], "confirmed");
    assert_eq!(json["rows"][1]["cells"][0][0]["client_name"], "Unknown Client");
}
