//! Session note repository

use anyhow::Result;
use practice::models::{ClientName, NamedRef, NewSessionNote, SessionNote};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

fn select_joined(source: &str) -> String {
    format!(
        r#"
        SELECT n.id, n.user_id, n.client_id, n.appointment_id, n.service_id, n.session_date,
               n.duration_minutes, n.notes, n.goals, n.progress_notes, n.next_steps,
               n.mood_rating, n.energy_level, n.pain_level, n.created_at, n.updated_at,
               c.first_name AS client_first_name, c.last_name AS client_last_name,
               s.name AS service_name
        FROM {source} n
        LEFT JOIN clients c ON c.id = n.client_id AND c.user_id = n.user_id
        LEFT JOIN services s ON s.id = n.service_id AND s.user_id = n.user_id
        "#
    )
}

#[derive(Clone)]
pub struct SessionNoteRepository {
    pool: PgPool,
}

impl SessionNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get all notes of an owner, most recent session first
    pub async fn list(&self, owner: Uuid) -> Result<Vec<SessionNote>> {
        let sql = format!(
            "{} WHERE n.user_id = $1 ORDER BY n.session_date DESC, n.id",
            select_joined("session_notes")
        );
        let rows = sqlx::query(&sql).bind(owner).fetch_all(&self.pool).await?;

        rows.iter().map(session_note_from_row).collect()
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<SessionNote>> {
        let sql = format!(
            "{} WHERE n.user_id = $1 AND n.id = $2",
            select_joined("session_notes")
        );
        let row = sqlx::query(&sql)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(session_note_from_row).transpose()
    }

    pub async fn create(&self, owner: Uuid, payload: &NewSessionNote) -> Result<SessionNote> {
        let sql = format!(
            r#"
            WITH inserted AS (
                INSERT INTO session_notes (user_id, client_id, appointment_id, service_id,
                                           session_date, duration_minutes, notes, goals,
                                           progress_notes, next_steps, mood_rating,
                                           energy_level, pain_level)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING *
            )
            {}
            "#,
            select_joined("inserted")
        );
        let row = sqlx::query(&sql)
            .bind(owner)
            .bind(payload.client_id)
            .bind(payload.appointment_id)
            .bind(payload.service_id)
            .bind(payload.session_date)
            .bind(payload.duration_minutes)
            .bind(&payload.notes)
            .bind(&payload.goals)
            .bind(&payload.progress_notes)
            .bind(&payload.next_steps)
            .bind(payload.mood_rating)
            .bind(payload.energy_level)
            .bind(payload.pain_level)
            .fetch_one(&self.pool)
            .await?;

        session_note_from_row(&row)
    }

    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        payload: &NewSessionNote,
    ) -> Result<Option<SessionNote>> {
        let sql = format!(
            r#"
            WITH updated AS (
                UPDATE session_notes
                SET client_id = $3, appointment_id = $4, service_id = $5, session_date = $6,
                    duration_minutes = $7, notes = $8, goals = $9, progress_notes = $10,
                    next_steps = $11, mood_rating = $12, energy_level = $13,
                    pain_level = $14, updated_at = NOW()
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
            .bind(payload.appointment_id)
            .bind(payload.service_id)
            .bind(payload.session_date)
            .bind(payload.duration_minutes)
            .bind(&payload.notes)
            .bind(&payload.goals)
            .bind(&payload.progress_notes)
            .bind(&payload.next_steps)
            .bind(payload.mood_rating)
            .bind(payload.energy_level)
            .bind(payload.pain_level)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(session_note_from_row).transpose()
    }

    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM session_notes WHERE user_id = $1 AND id = $2")
            .bind(owner)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn session_note_from_row(row: &PgRow) -> Result<SessionNote> {
    Ok(SessionNote {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        client_id: row.try_get("client_id")?,
        appointment_id: row.try_get("appointment_id")?,
        service_id: row.try_get("service_id")?,
        session_date: row.try_get("session_date")?,
        duration_minutes: row.try_get("duration_minutes")?,
        notes: row.try_get("notes")?,
        goals: row.try_get("goals")?,
        progress_notes: row.try_get("progress_notes")?,
        next_steps: row.try_get("next_steps")?,
        mood_rating: row.try_get("mood_rating")?,
        energy_level: row.try_get("energy_level")?,
        pain_level: row.try_get("pain_level")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        client: ClientName::from_columns(
            row.try_get("client_first_name")?,
            row.try_get("client_last_name")?,
        ),
        service: NamedRef::from_column(row.try_get("service_name")?),
    })
}
