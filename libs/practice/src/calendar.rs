//! Appointment calendar grid
//!
//! Builds the day and week views of the appointment calendar. A day is split
//! into fixed one-hour slots (8:00 AM through 6:00 PM); every appointment is
//! placed in the slot of the hour it starts in, on the column of the date it
//! starts on. Dates and hours are read in the owner's timezone, which is passed
//! in through [`CalendarContext`].
//!
//! Placement is by start hour only: a two hour appointment occupies a single
//! cell, and an appointment starting outside the slot range has no cell at all
//! (it is still returned by the plain appointment listing).

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

use crate::models::Appointment;

/// Days the cursor moves on each page, in both views
const PAGE_DAYS: Days = Days::new(7);

/// Hour of the first slot of the day
pub const FIRST_SLOT_HOUR: u32 = 8;
/// Hour of the last slot of the day
pub const LAST_SLOT_HOUR: u32 = 18;

/// How many date columns the grid shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
}

/// Per-owner settings the grid is computed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarContext {
    pub timezone: Tz,
}

impl Default for CalendarContext {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}

impl CalendarContext {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Wall-clock start of an appointment in the owner's zone
    pub fn local_start(&self, appointment: &Appointment) -> NaiveDateTime {
        self.local(appointment.start_time)
    }

    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.timezone).naive_local()
    }

    /// Current calendar date for the owner
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local(now).date()
    }
}

/// One-hour display bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub label: String,
    /// 24-hour clock
    pub hour: u32,
}

impl TimeSlot {
    pub fn from_hour(hour: u32) -> Self {
        Self {
            label: format_slot_label(hour),
            hour,
        }
    }
}

/// The default slots, 8:00 AM through 6:00 PM
pub fn fixed_time_slots() -> Vec<TimeSlot> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(TimeSlot::from_hour)
        .collect()
}

/// Render a 24-hour value as a 12-hour slot label such as "1:00 PM"
pub fn format_slot_label(hour: u32) -> String {
    let hour = hour % 24;
    let (display, meridiem) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!("{}:00 {}", display, meridiem)
}

/// Map a 12-hour slot label ("9:00 AM", "12:00 PM") to its 24-hour value.
///
/// Noon stays 12 and midnight is 0. Returns `None` for anything that is not a
/// `h[:mm] AM|PM` label.
pub fn parse_slot_hour(label: &str) -> Option<u32> {
    let mut parts = label.split_whitespace();
    let time = parts.next()?;
    let meridiem = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let hour: u32 = time.split(':').next()?.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    if meridiem.eq_ignore_ascii_case("AM") {
        Some(if hour == 12 { 0 } else { hour })
    } else if meridiem.eq_ignore_ascii_case("PM") {
        Some(if hour == 12 { 12 } else { hour + 12 })
    } else {
        None
    }
}

/// Monday through Sunday of the week containing `reference`
///
/// Saturates at the ends of the representable range: the week of
/// `NaiveDate::MIN` starts at `MIN`, and days past `NaiveDate::MAX` repeat `MAX`.
pub fn week_dates(reference: NaiveDate) -> [NaiveDate; 7] {
    let offset = u64::from(reference.weekday().num_days_from_monday());
    let monday = reference
        .checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN);
    std::array::from_fn(|i| {
        monday
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(NaiveDate::MAX)
    })
}

/// Appointments whose local start falls on `date`, in input order
pub fn appointments_on<'a>(
    appointments: &'a [Appointment],
    date: NaiveDate,
    ctx: &'a CalendarContext,
) -> impl Iterator<Item = &'a Appointment> + 'a {
    appointments
        .iter()
        .filter(move |appointment| ctx.local_start(appointment).date() == date)
}

/// Appointments of one slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotBucket<'a> {
    pub slot: TimeSlot,
    pub appointments: Vec<&'a Appointment>,
}

/// A single date split into slot buckets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySlots<'a> {
    pub date: NaiveDate,
    pub buckets: Vec<SlotBucket<'a>>,
}

impl<'a> DaySlots<'a> {
    /// Bucket contents for a slot label; `None` when the label is not one of the slots
    pub fn get(&self, label: &str) -> Option<&[&'a Appointment]> {
        self.buckets
            .iter()
            .find(|bucket| bucket.slot.label == label)
            .map(|bucket| bucket.appointments.as_slice())
    }

    /// Number of appointments placed in any bucket
    pub fn placed(&self) -> usize {
        self.buckets.iter().map(|b| b.appointments.len()).sum()
    }
}

/// Split the appointments of `date` into `slots` by start hour
pub fn slots_for_day<'a>(
    slots: &[TimeSlot],
    appointments: &'a [Appointment],
    date: NaiveDate,
    ctx: &CalendarContext,
) -> DaySlots<'a> {
    let on_day: Vec<(u32, &'a Appointment)> = appointments
        .iter()
        .filter_map(|appointment| {
            let start = ctx.local_start(appointment);
            (start.date() == date).then_some((start.hour(), appointment))
        })
        .collect();

    let buckets = slots
        .iter()
        .map(|slot| SlotBucket {
            slot: slot.clone(),
            appointments: on_day
                .iter()
                .filter(|(hour, _)| *hour == slot.hour)
                .map(|(_, appointment)| *appointment)
                .collect(),
        })
        .collect();

    DaySlots { date, buckets }
}

/// Navigation state of the calendar: a free-running reference date and a view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCursor {
    pub reference: NaiveDate,
    pub view: ViewMode,
}

impl CalendarCursor {
    pub fn new(reference: NaiveDate, view: ViewMode) -> Self {
        Self { reference, view }
    }

    /// Go back one week, stopping at `NaiveDate::MIN`. Day view pages by a
    /// full week as well.
    pub fn previous(&mut self) {
        self.reference = self
            .reference
            .checked_sub_days(PAGE_DAYS)
            .unwrap_or(NaiveDate::MIN);
    }

    /// Go forward one week, stopping at `NaiveDate::MAX`
    pub fn next(&mut self) {
        self.reference = self
            .reference
            .checked_add_days(PAGE_DAYS)
            .unwrap_or(NaiveDate::MAX);
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// Dates shown as columns for the current view
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        match self.view {
            ViewMode::Week => week_dates(self.reference).to_vec(),
            ViewMode::Day => vec![self.reference],
        }
    }
}

/// One slot row across all visible dates; `cells[i]` belongs to `dates[i]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow<'a> {
    pub slot: TimeSlot,
    #[serde(serialize_with = "serialize_cells")]
    pub cells: Vec<Vec<&'a Appointment>>,
}

/// Calendar card: the appointment plus the name to print on it
#[derive(Serialize)]
struct CalendarCard<'a> {
    #[serde(flatten)]
    appointment: &'a Appointment,
    client_name: String,
}

#[allow(clippy::ptr_arg)]
fn serialize_cells<S: Serializer>(
    cells: &Vec<Vec<&Appointment>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(cells.iter().map(|cell| {
        cell.iter()
            .map(|appointment| CalendarCard {
                appointment,
                client_name: appointment.client_display_name(),
            })
            .collect::<Vec<_>>()
    }))
}

/// Renderable calendar: date columns by slot rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarGrid<'a> {
    pub view: ViewMode,
    pub reference: NaiveDate,
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<GridRow<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Cell at (`slot_label`, column `column`)
    pub fn cell(&self, slot_label: &str, column: usize) -> Option<&[&'a Appointment]> {
        self.rows
            .iter()
            .find(|row| row.slot.label == slot_label)
            .and_then(|row| row.cells.get(column))
            .map(Vec::as_slice)
    }
}

/// Build the grid for the cursor's view
pub fn build_grid<'a>(
    cursor: &CalendarCursor,
    slots: &[TimeSlot],
    appointments: &'a [Appointment],
    ctx: &CalendarContext,
) -> CalendarGrid<'a> {
    let dates = cursor.visible_dates();
    let days: Vec<DaySlots<'a>> = dates
        .iter()
        .map(|date| slots_for_day(slots, appointments, *date, ctx))
        .collect();

    let visible = dates
        .iter()
        .map(|date| appointments_on(appointments, *date, ctx).count())
        .sum::<usize>();
    let placed = days.iter().map(DaySlots::placed).sum::<usize>();
    if placed < visible {
        debug!(
            "{} appointment(s) start outside the slot range and are not on the grid",
            visible - placed
        );
    }

    let rows = slots
        .iter()
        .enumerate()
        .map(|(index, slot)| GridRow {
            slot: slot.clone(),
            cells: days
                .iter()
                .map(|day| {
                    day.buckets
                        .get(index)
                        .map(|bucket| bucket.appointments.clone())
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect();

    CalendarGrid {
        view: cursor.view,
        reference: cursor.reference,
        dates,
        rows,
    }
}
