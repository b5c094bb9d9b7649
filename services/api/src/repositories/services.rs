//! Service catalog repository

use anyhow::Result;
use practice::models::{NewService, Service};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

const SERVICE_COLUMNS: &str =
    "id, user_id, name, description, duration_minutes, price, is_active, created_at, updated_at";

/// Service repository for database operations
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all services of an owner, newest first
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Service>> {
        let rows = sqlx::query(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(service_from_row).collect()
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Service>> {
        let row = sqlx::query(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE user_id = $1 AND id = $2"
        ))
        .bind(owner)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(service_from_row).transpose()
    }

    pub async fn create(&self, owner: Uuid, payload: &NewService) -> Result<Service> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO services (user_id, name, description, duration_minutes, price, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.duration_minutes)
        .bind(payload.price)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;

        service_from_row(&row)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        payload: &NewService,
    ) -> Result<Option<Service>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE services
            SET name = $3, description = $4, duration_minutes = $5, price = $6,
                is_active = $7, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING {SERVICE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.duration_minutes)
        .bind(payload.price)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(service_from_row).transpose()
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn service_from_row(row: &PgRow) -> Result<Service> {
    Ok(Service {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        duration_minutes: row.try_get("duration_minutes")?,
        price: row.try_get("price")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
