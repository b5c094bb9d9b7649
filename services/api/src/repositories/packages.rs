//! Package repository

use anyhow::Result;
use practice::models::{NewPackage, Package};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

const PACKAGE_COLUMNS: &str = "id, user_id, name, description, price, session_count, \
     validity_days, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PackageRepository {
    pool: PgPool,
}

impl PackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Package>> {
        let rows = sqlx::query(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(package_from_row).collect()
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Package>> {
        let row = sqlx::query(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE user_id = $1 AND id = $2"
        ))
        .bind(owner)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(package_from_row).transpose()
    }

    pub async fn create(&self, owner: Uuid, payload: &NewPackage) -> Result<Package> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO packages (user_id, name, description, price, session_count,
                                  validity_days, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PACKAGE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.session_count)
        .bind(payload.validity_days)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;

        package_from_row(&row)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        payload: &NewPackage,
    ) -> Result<Option<Package>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE packages
            SET name = $3, description = $4, price = $5, session_count = $6,
                validity_days = $7, is_active = $8, updated_at = NOW()
            WHERE user_id = $1 AND id = $2
            RETURNING {PACKAGE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.price)
        .bind(payload.session_count)
        .bind(payload.validity_days)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(package_from_row).transpose()
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM packages WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn package_from_row(row: &PgRow) -> Result<Package> {
    Ok(Package {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        session_count: row.try_get("session_count")?,
        validity_days: row.try_get("validity_days")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
