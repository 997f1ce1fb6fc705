//! # Hogwarts DB
//!
//! Database pool and migrations for the Hogwarts API.
//!
//! This crate provides connection pool initialization using SQLx with
//! PostgreSQL, and embeds the SQL migrations from the repository root.
//!
//! # Example
//!
//! ```ignore
//! use hogwarts_config::DatabaseConfig;
//! use hogwarts_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//!     let pool = init_db_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use hogwarts_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Migrations embedded at compile time from `migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and should be stored in the
/// application state for use in request handlers.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
