//! API models for query strings and response payloads

use chrono::NaiveDate;
use practice::calendar::{CalendarGrid, ViewMode};
use serde::{Deserialize, Serialize};

/// Query string of every list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring over the entity's display fields
    pub search: Option<String>,
}

/// Query string of `GET /calendar`
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// Reference date; today in the owner's timezone when omitted
    pub date: Option<NaiveDate>,
    pub view: Option<ViewMode>,
}

/// Calendar grid plus the reference dates one page back and forward
#[derive(Serialize)]
pub struct CalendarResponse<'a> {
    #[serde(flatten)]
    pub grid: CalendarGrid<'a>,
    pub previous: NaiveDate,
    pub next: NaiveDate,
    pub timezone: String,
}

/// Response of the delete endpoints
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: String,
}
