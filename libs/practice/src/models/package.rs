//! Session package model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::service::default_active;

/// Prepaid bundle of sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub session_count: i32,
    pub validity_days: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New package payload, also used for full-replacement updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPackage {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub session_count: i32,
    #[serde(default = "default_validity_days")]
    pub validity_days: Option<i32>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_validity_days() -> Option<i32> {
    Some(90)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_package_defaults_validity_to_ninety_days() {
        let payload: NewPackage = serde_json::from_value(serde_json::json!({
            "name": "Starter",
            "price": "120.00",
            "session_count": 3
        }))
        .unwrap();

        assert_eq!(payload.validity_days, Some(90));
        assert!(payload.is_active);
        assert_eq!(payload.price, Decimal::new(12000, 2));
    }
}
