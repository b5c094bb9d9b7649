//! Payment repository
//!
//! Payments join in the client, service and package names. `payment_date`
//! falls back to the database's current date when the payload omits it.

use anyhow::Result;
use practice::models::{ClientName, NamedRef, NewPayment, Payment};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use super::{enum_column, optional_enum_column};

fn select_joined(source: &str) -> String {
    format!(
        r#"
        SELECT p.id, p.user_id, p.client_id, p.package_id, p.service_id, p.amount,
               p.currency, p.payment_method, p.status, p.transaction_id, p.payment_date,
               p.notes, p.created_at, p.updated_at,
               c.first_name AS client_first_name, c.last_name AS client_last_name,
               s.name AS service_name, k.name AS package_name
        FROM {source} p
        LEFT JOIN clients c ON c.id = p.client_id AND c.user_id = p.user_id
        LEFT JOIN services s ON s.id = p.service_id AND s.user_id = p.user_id
        LEFT JOIN packages k ON k.id = p.package_id AND k.user_id = p.user_id
        "#
    )
}

/// Payment repository for database operations
#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all payments of an owner, most recent payment date first
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Payment>> {
        let sql = format!(
            "{} WHERE p.user_id = $1 ORDER BY p.payment_date DESC, p.created_at DESC",
            select_joined("payments")
        );
        let rows = sqlx::query(&sql).bind(owner).fetch_all(&self.pool).await?;

        rows.iter().map(payment_from_row).collect()
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Payment>> {
        let sql = format!(
            "{} WHERE p.user_id = $1 AND p.id = $2",
            select_joined("payments")
        );
        let row = sqlx::query(&sql)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(payment_from_row).transpose()
    }

    pub async fn create(&self, owner: Uuid, payload: &NewPayment) -> Result<Payment> {
        info!(
            "Recording payment of {} for client {}",
            payload.amount, payload.client_id
        );

        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO payments (user_id, client_id, package_id, service_id, amount,
                                      currency, payment_method, status, transaction_id,
                                      payment_date, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, CURRENT_DATE), $11)
                RETURNING *
            )
            {}
            "#,
            select_joined("inserted")
        );
        let row = sqlx::query(&sql)
            .bind(owner)
            .bind(payload.client_id)
            .bind(payload.package_id)
            .bind(payload.service_id)
            .bind(payload.amount)
            .bind(&payload.currency)
            .bind(payload.payment_method.map(|m| m.as_str()))
            .bind(payload.status.as_str())
            .bind(&payload.transaction_id)
            .bind(payload.payment_date)
            .bind(&payload.notes)
            .fetch_one(&self.pool)
            .await?;

        payment_from_row(&row)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        payload: &NewPayment,
    ) -> Result<Option<Payment>> {
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE payments
                SET client_id = $3, package_id = $4, service_id = $5, amount = $6,
                    currency = $7, payment_method = $8, status = $9, transaction_id = $10,
                    payment_date = COALESCE($11, payment_date), notes = $12,
                    updated_at = NOW()
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
            .bind(payload.package_id)
            .bind(payload.service_id)
            .bind(payload.amount)
            .bind(&payload.currency)
            .bind(payload.payment_method.map(|m| m.as_str()))
            .bind(payload.status.as_str())
            .bind(&payload.transaction_id)
            .bind(payload.payment_date)
            .bind(&payload.notes)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(payment_from_row).transpose()
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn payment_from_row(row: &PgRow) -> Result<Payment> {
    Ok(Payment {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        client_id: row.try_get("client_id")?,
        package_id: row.try_get("package_id")?,
        service_id: row.try_get("service_id")?,
        amount: row.try_get("amount")?,
        currency: row.try_get("currency")?,
        payment_method: optional_enum_column(row, "payment_method")?,
        status: enum_column(row, "status")?,
        transaction_id: row.try_get("transaction_id")?,
        payment_date: row.try_get("payment_date")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        client: ClientName::from_columns(
            row.try_get("client_first_name")?,
            row.try_get("client_last_name")?,
        ),
        service: NamedRef::from_column(row.try_get("service_name")?),
        package: NamedRef::from_column(row.try_get("package_name")?),
    })
}
