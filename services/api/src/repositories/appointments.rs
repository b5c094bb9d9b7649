//! Appointment repository for database operations
//!
//! Reads join in the client's name and the service's name. Both joins are
//! LEFT JOINs: an appointment whose client was deleted is still returned, with
//! an empty client lookup.

use anyhow::Result;
use chrono::{DateTime, Utc};
use practice::models::{Appointment, ClientName, NamedRef, NewAppointment};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::enum_column;

/// Joined select over `source`, which is either the table or a CTE of changed rows
fn select_joined(source: &str) -> String {
    format!(
        r#"
        SELECT a.id, a.user_id, a.client_id, a.service_id, a.title, a.description,
               a.start_time, a.end_time, a.status, a.location, a.notes,
               a.created_at, a.updated_at,
               c.first_name AS client_first_name, c.last_name AS client_last_name,
               s.name AS service_name
        FROM {source} a
        LEFT JOIN clients c ON c.id = a.client_id AND c.user_id = a.user_id
        LEFT JOIN services s ON s.id = a.service_id AND s.user_id = a.user_id
        "#
    )
}

/// Appointment repository for database operations
#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all appointments of an owner, earliest start first
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Appointment>> {
        let sql = format!(
            "{} WHERE a.user_id = $1 ORDER BY a.start_time ASC, a.id",
            select_joined("appointments")
        );
        let rows = sqlx::query(&sql).bind(owner).fetch_all(&self.pool).await?;

        rows.iter().map(appointment_from_row).collect()
    }

    /// Appointments starting in `[from, to)`, earliest first
    pub async fn list_between(
        &self,
        owner: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>> {
        let sql = format!(
            "{} WHERE a.user_id = $1 AND a.start_time >= $2 AND a.start_time < $3 \
             ORDER BY a.start_time ASC, a.id",
            select_joined("appointments")
        );
        let rows = sqlx::query(&sql)
            .bind(owner)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(appointment_from_row).collect()
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Appointment>> {
        let sql = format!(
            "{} WHERE a.user_id = $1 AND a.id = $2",
            select_joined("appointments")
        );
        let row = sqlx::query(&sql)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(appointment_from_row).transpose()
    }

    pub async fn create(&self, owner: Uuid, payload: &NewAppointment) -> Result<Appointment> {
        info!(
            "Creating appointment '{}' at {}",
            payload.title, payload.start_time
        );

        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO appointments (user_id, client_id, service_id, title, description,
                                          start_time, end_time, status, location, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            {}
            "#,
            select_joined("inserted")
        );
        let row = sqlx::query(&sql)
            .bind(owner)
            .bind(payload.client_id)
            .bind(payload.service_id)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(payload.start_time)
            .bind(payload.end_time)
            .bind(payload.status.as_str())
            .bind(&payload.location)
            .bind(&payload.notes)
            .fetch_one(&self.pool)
            .await?;

        appointment_from_row(&row)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        payload: &NewAppointment,
    ) -> Result<Option<Appointment>> {
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE appointments
                SET client_id = $3, service_id = $4, title = $5, description = $6,
                    start_time = $7, end_time = $8, status = $9, location = $10,
                    notes = $11, updated_at = NOW()
                WHERE user_id = $1 AND id = $2
                RETURNING *
            )
            {}
            "#,
            select_joined("updated")
        );
        let row = sqlx::query(&sql)
            .bind(owner)
            .bind(id)
            .bind(payload.client_id)
            .bind(payload.service_id)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(payload.start_time)
            .bind(payload.end_time)
            .bind(payload.status.as_str())
            .bind(&payload.location)
            .bind(&payload.notes)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(appointment_from_row).transpose()
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM appointments WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn appointment_from_row(row: &PgRow) -> Result<Appointment> {
    Ok(Appointment {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        client_id: row.try_get("client_id")?,
        service_id: row.try_get("service_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        status: enum_column(row, "status")?,
        location: row.try_get("location")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        client: ClientName::from_columns(
            row.try_get("client_first_name")?,
            row.try_get("client_last_name")?,
        ),
        service: NamedRef::from_column(row.try_get("service_name")?),
    })
}
