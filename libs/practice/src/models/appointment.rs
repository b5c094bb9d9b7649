//! Appointment model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::{ClientName, NamedRef, UnknownVariant, client_display_name};

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            other => Err(UnknownVariant {
                kind: "appointment status",
                value: other.to_string(),
            }),
        }
    }
}

/// Appointment entity, with the client and service lookups joined in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub service_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Absent when the referenced client has been removed
    pub client: Option<ClientName>,
    pub service: Option<NamedRef>,
}

impl Appointment {
    /// Name shown on calendar cards
    pub fn client_display_name(&self) -> String {
        client_display_name(self.client.as_ref())
    }
}

/// New appointment payload, also used for full-replacement updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub client_id: Uuid,
    pub service_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_its_storage_name() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ] {
            assert_eq!(status.as_str().parse::<AppointmentStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "pending".parse::<AppointmentStatus>().unwrap_err();
        assert_eq!(err.value, "pending");
    }

    #[test]
    fn new_appointment_defaults_to_scheduled() {
        let payload: NewAppointment = serde_json::from_value(serde_json::json!({
            "client_id": Uuid::nil(),
            "title": "Intro session",
            "start_time": "2024-05-06T09:00:00Z",
            "end_time": "2024-05-06T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(payload.status, AppointmentStatus::Scheduled);
        assert!(payload.service_id.is_none());
    }

    #[test]
    fn no_show_uses_snake_case_on_the_wire() {
        let json = serde_json::to_value(AppointmentStatus::NoShow).unwrap();
        assert_eq!(json, "no_show");
    }
}
