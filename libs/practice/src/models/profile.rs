//! Business owner profile

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Profile of the authenticated business owner; `id` is the owner id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub business_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// IANA zone name, e.g. "Europe/Berlin"
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Resolve the configured zone, falling back to UTC when unset or unknown
    pub fn tz(&self) -> Tz {
        resolve_timezone(self.timezone.as_deref())
    }
}

/// Profile update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfile {
    pub business_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub timezone: Option<String>,
}

/// Parse an IANA zone name, defaulting to UTC
pub fn resolve_timezone(name: Option<&str>) -> Tz {
    match name {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Unknown timezone {:?}, falling back to UTC", name);
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_zone() {
        assert_eq!(resolve_timezone(Some("Europe/Berlin")), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn unknown_or_missing_zone_is_utc() {
        assert_eq!(resolve_timezone(Some("Mars/Olympus")), Tz::UTC);
        assert_eq!(resolve_timezone(None), Tz::UTC);
    }
}
