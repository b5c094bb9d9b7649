//! Practice models

pub mod appointment;
pub mod client;
pub mod package;
pub mod payment;
pub mod profile;
pub mod service;
pub mod session_note;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export for convenience
pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use client::{Client, ClientStatus, NewClient};
pub use package::{NewPackage, Package};
pub use payment::{NewPayment, Payment, PaymentMethod, PaymentStatus};
pub use profile::{Profile, UpdateProfile};
pub use service::{NewService, Service};
pub use session_note::{NewSessionNote, SessionNote};

/// Raised when a stored enumeration value is not one we know about
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Joined client lookup carried on appointments, payments and session notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientName {
    pub first_name: String,
    pub last_name: String,
}

impl ClientName {
    /// Build the lookup from nullable joined columns; absent when the client is gone
    pub fn from_columns(first_name: Option<String>, last_name: Option<String>) -> Option<Self> {
        match (first_name, last_name) {
            (Some(first_name), Some(last_name)) => Some(Self {
                first_name,
                last_name,
            }),
            _ => None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Joined lookup for records that are displayed by name only (services, packages)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

impl NamedRef {
    pub fn from_column(name: Option<String>) -> Option<Self> {
        name.map(|name| Self { name })
    }
}

/// Display label used when a referenced client no longer exists
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

pub(crate) fn client_display_name(client: Option<&ClientName>) -> String {
    client
        .map(ClientName::full_name)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_name_requires_both_columns() {
        assert!(ClientName::from_columns(Some("Ada".into()), None).is_none());
        assert!(ClientName::from_columns(None, None).is_none());

        let name = ClientName::from_columns(Some("Ada".into()), Some("Lovelace".into())).unwrap();
        assert_eq!(name.full_name(), "Ada Lovelace");
    }

    #[test]
    fn missing_client_displays_placeholder() {
        assert_eq!(client_display_name(None), "Unknown Client");
    }
}
