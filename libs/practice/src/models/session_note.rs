//! Session note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ClientName, NamedRef};

/// Clinical note recorded after a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionNote {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub session_date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub notes: String,
    pub goals: Option<String>,
    pub progress_notes: Option<String>,
    pub next_steps: Option<String>,
    /// 1 to 10
    pub mood_rating: Option<i16>,
    /// 1 to 10
    pub energy_level: Option<i16>,
    /// 0 to 10
    pub pain_level: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: Option<ClientName>,
    pub service: Option<NamedRef>,
}

/// New session note payload, also used for full-replacement updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSessionNote {
    pub client_id: Uuid,
    pub appointment_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub session_date: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub notes: String,
    pub goals: Option<String>,
    pub progress_notes: Option<String>,
    pub next_steps: Option<String>,
    pub mood_rating: Option<i16>,
    pub energy_level: Option<i16>,
    pub pain_level: Option<i16>,
}
