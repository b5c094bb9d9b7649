//! Common library for the wellness practice service
//!
//! This crate provides shared functionality used by the practice services,
//! including database connectivity, schema migrations and error handling.

pub mod database;
pub mod error;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let pool = init_pool(&config).await?;
///     run_migrations(&pool).await?;
///     health_check(&pool).await?;
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
