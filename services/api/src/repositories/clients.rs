//! Client repository for database operations

use anyhow::Result;
use practice::models::{Client, NewClient};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::enum_column;

const CLIENT_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone, date_of_birth, \
     address, emergency_contact_name, emergency_contact_phone, health_conditions, medications, \
     goals, notes, status, created_at, updated_at";

/// Client repository for database operations
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    /// Create a new client repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all clients of an owner, newest first
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Client>> {
        let rows = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(client_from_row).collect()
    }

    /// Find a client by ID
    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Client>> {
        let row = sqlx::query(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE user_id = $1 AND id = $2"
        ))
        .bind(owner)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(client_from_row).transpose()
    }

    /// Create a new client
    pub async fn create(&self, owner: Uuid, payload: &NewClient) -> Result<Client> {
        info!("Creating client {} {}", payload.first_name, payload.last_name);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO clients (user_id, first_name, last_name, email, phone, date_of_birth,
                                 address, emergency_contact_name, emergency_contact_phone,
                                 health_conditions, medications, goals, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.date_of_birth)
        .bind(&payload.address)
        .bind(&payload.emergency_contact_name)
        .bind(&payload.emergency_contact_phone)
        .bind(&payload.health_conditions)
        .bind(&payload.medications)
        .bind(&payload.goals)
        .bind(&payload.notes)
        .bind(payload.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        client_from_row(&row)
    }

    /// Replace a client's fields; `None` when the client does not exist
    pub async fn update(&self, owner: Uuid, id: Uuid, payload: &NewClient) -> Result<Option<Client>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE clients
            SET first_name = $3, last_name = $4, email = $5, phone = $6, date_of_birth = $7,
                address = $8, emergency_contact_name = $9, emergency_contact_phone = $10,
                health_conditions = $11, medications = $12, goals = $13, notes = $14,
                status = $15, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(payload.date_of_birth)
        .bind(&payload.address)
        .bind(&payload.emergency_contact_name)
        .bind(&payload.emergency_contact_phone)
        .bind(&payload.health_conditions)
        .bind(&payload.medications)
        .bind(&payload.goals)
        .bind(&payload.notes)
        .bind(payload.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(client_from_row).transpose()
    }

    /// Delete a client. Appointments, notes and payments referencing it are kept.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn client_from_row(row: &PgRow) -> Result<Client> {
    Ok(Client {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        date_of_birth: row.try_get("date_of_birth")?,
        address: row.try_get("address")?,
        emergency_contact_name: row.try_get("emergency_contact_name")?,
        emergency_contact_phone: row.try_get("emergency_contact_phone")?,
        health_conditions: row.try_get("health_conditions")?,
        medications: row.try_get("medications")?,
        goals: row.try_get("goals")?,
        notes: row.try_get("notes")?,
        status: enum_column(row, "status")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
