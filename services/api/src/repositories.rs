//! Repositories for database operations
//!
//! Every repository is scoped by the owning user: each statement filters on
//! `user_id`, so one owner can never read or change another owner's rows.
//! Updates replace the whole record with the submitted payload.

use anyhow::Result;
use practice::models::UnknownVariant;
use sqlx::{Row, postgres::PgRow};
use std::str::FromStr;

pub mod appointments;
pub mod clients;
pub mod packages;
pub mod payments;
pub mod profiles;
pub mod services;
pub mod session_notes;

pub use appointments::AppointmentRepository;
pub use clients::ClientRepository;
pub use packages::PackageRepository;
pub use payments::PaymentRepository;
pub use profiles::ProfileRepository;
pub use services::ServiceRepository;
pub use session_notes::SessionNoteRepository;

/// Decode a text column holding one of our enumerations
pub(crate) fn enum_column<T>(row: &PgRow, column: &str) -> Result<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    let value: String = row.try_get(column)?;
    Ok(value.parse()?)
}

/// Decode a nullable text column holding one of our enumerations
pub(crate) fn optional_enum_column<T>(row: &PgRow, column: &str) -> Result<Option<T>>
where
    T: FromStr<Err = UnknownVariant>,
{
    let value: Option<String> = row.try_get(column)?;
    Ok(value.map(|v| v.parse()).transpose()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use common::database::{DatabaseConfig, init_pool, run_migrations};
    use practice::models::{AppointmentStatus, ClientStatus, NewAppointment, NewClient};
    use sqlx::PgPool;
    use uuid::Uuid;

    async fn pool() -> anyhow::Result<PgPool> {
        let pool = init_pool(&DatabaseConfig::from_env()?).await?;
        run_migrations(&pool).await?;
        Ok(pool)
    }

    fn new_client() -> NewClient {
        NewClient {
            first_name: "Maya".to_string(),
            last_name: "Chen".to_string(),
            email: Some("maya@example.com".to_string()),
            phone: None,
            date_of_birth: None,
            address: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            health_conditions: None,
            medications: None,
            goals: None,
            notes: None,
            status: ClientStatus::Active,
        }
    }

    #[tokio::test]
    #[ignore = "requires a running PostgreSQL instance"]
    async fn appointment_outlives_its_client_and_stays_with_its_owner() -> anyhow::Result<()> {
        let pool = pool().await?;
        let clients = ClientRepository::new(pool.clone());
        let appointments = AppointmentRepository::new(pool);
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let client = clients.create(owner, &new_client()).await?;
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 15, 0).unwrap();
        let payload = NewAppointment {
            client_id: client.id,
            service_id: None,
            title: "Initial assessment".to_string(),
            description: None,
            start_time: start,
            end_time: start + TimeDelta::hours(1),
            status: AppointmentStatus::Scheduled,
            location: None,
            notes: None,
        };
        let appointment = appointments.create(owner, &payload).await?;
        assert_eq!(
            appointment.client.as_ref().map(|c| c.full_name()).as_deref(),
            Some("Maya Chen")
        );

        // Another owner sees nothing and changes nothing
        assert!(clients.get(stranger, client.id).await?.is_none());
        assert!(appointments.get(stranger, appointment.id).await?.is_none());
        assert!(appointments.update(stranger, appointment.id, &payload).await?.is_none());
        assert!(!appointments.delete(stranger, appointment.id).await?);
        assert!(!clients.delete(stranger, client.id).await?);
        assert!(
            appointments
                .list_between(stranger, start - TimeDelta::days(1), start + TimeDelta::days(1))
                .await?
                .is_empty()
        );

        assert!(clients.delete(owner, client.id).await?);

        let orphan = appointments
            .get(owner, appointment.id)
            .await?
            .expect("appointment survives its client");
        assert!(orphan.client.is_none());
        assert_eq!(orphan.client_display_name(), "Unknown Client");

        let window = appointments
            .list_between(owner, start - TimeDelta::days(1), start + TimeDelta::days(1))
            .await?;
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].id, appointment.id);
        assert!(window[0].client.is_none());

        assert!(appointments.delete(owner, appointment.id).await?);
        Ok(())
    }
}
