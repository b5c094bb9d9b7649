//! Payment model and related functionality

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::{ClientName, NamedRef, UnknownVariant};

/// Settlement status of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    #[default]
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(UnknownVariant {
                kind: "payment status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Online => "online",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "online" => Ok(PaymentMethod::Online),
            other => Err(UnknownVariant {
                kind: "payment method",
                value: other.to_string(),
            }),
        }
    }
}

/// Payment entity, with client, service and package lookups joined in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub client_id: Uuid,
    pub package_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub amount: Decimal,
    pub currency: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: Option<ClientName>,
    pub service: Option<NamedRef>,
    pub package: Option<NamedRef>,
}

/// New payment payload, also used for full-replacement updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub client_id: Uuid,
    pub package_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    /// Defaults to the current date when omitted
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

fn default_currency() -> Option<String> {
    Some("USD".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_payment_defaults() {
        let payload: NewPayment = serde_json::from_value(serde_json::json!({
            "client_id": Uuid::nil(),
            "amount": 85.5
        }))
        .unwrap();

        assert_eq!(payload.status, PaymentStatus::Completed);
        assert_eq!(payload.currency.as_deref(), Some("USD"));
        assert_eq!(payload.amount, Decimal::new(855, 1));
        assert!(payload.payment_date.is_none());
    }

    #[test]
    fn payment_method_parses_storage_names() {
        assert_eq!(
            "bank_transfer".parse::<PaymentMethod>(),
            Ok(PaymentMethod::BankTransfer)
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }
}
