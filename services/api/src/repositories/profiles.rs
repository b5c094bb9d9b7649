//! Owner profile repository

use anyhow::Result;
use practice::models::{Profile, UpdateProfile};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, business_name, first_name, last_name, email, phone, bio, \
     avatar_url, timezone, created_at, updated_at";

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Profile of an owner, if one was ever saved
    pub async fn get(&self, owner: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    /// Create or replace the owner's profile
    pub async fn upsert(&self, owner: Uuid, payload: &UpdateProfile) -> Result<Profile> {
        info!("Saving profile for owner {}", owner);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO profiles (id, business_name, first_name, last_name, email, phone,
                                  bio, avatar_url, timezone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE
            SET business_name = EXCLUDED.business_name,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                bio = EXCLUDED.bio,
                avatar_url = EXCLUDED.avatar_url,
                timezone = EXCLUDED.timezone,
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(owner)
        .bind(&payload.business_name)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.bio)
        .bind(&payload.avatar_url)
        .bind(&payload.timezone)
        .fetch_one(&self.pool)
        .await?;

        profile_from_row(&row)
    }
}

fn profile_from_row(row: &PgRow) -> Result<Profile> {
    Ok(Profile {
        id: row.try_get("id")?,
        business_name: row.try_get("business_name")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        bio: row.try_get("bio")?,
        avatar_url: row.try_get("avatar_url")?,
        timezone: row.try_get("timezone")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
