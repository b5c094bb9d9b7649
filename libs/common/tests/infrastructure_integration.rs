//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database is reachable and that the
//! embedded schema migrations apply cleanly. They need a running database
//! pointed to by `DATABASE_URL`, so they are ignored by default.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    health_check(&pool).await?;

    run_migrations(&pool).await?;
    // Running twice must be a no-op
    run_migrations(&pool).await?;

    let row = sqlx::query(
        "SELECT COUNT(*) AS tables FROM information_schema.tables \
         WHERE table_schema = 'public' AND table_name IN \
         ('profiles', 'clients', 'services', 'packages', 'appointments', 'session_notes', 'payments')",
    )
    .fetch_one(&pool)
    .await?;

    let tables: i64 = row.get("tables");
    assert_eq!(tables, 7, "Expected every practice table to exist");

    Ok(())
}
