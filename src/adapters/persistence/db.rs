use sqlx::migrate::Migrator;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::utils::error::Result;
use crate::utils::logger::mask_database_url;

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens a connection pool and, when configured, brings the schema up to date.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = open_pool(config).await?;

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(pool)
}

/// Opens a connection pool without touching the schema.
pub async fn open_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("Connecting to database: {}", mask_database_url(&config.url));

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            e
        })?;

    info!("Database connection pool created");
    Ok(pool)
}

/// Applies every pending migration in [`MIGRATOR`].
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations");
    MIGRATOR.run(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}

/// Round-trips a trivial query.
pub async fn ping(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Read-only check for the `users` table in the `public` schema.
pub async fn users_table_exists(pool: &PgPool) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM information_schema.tables
            WHERE table_schema = 'public'
              AND table_name = 'users'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Pings the database and reports whether the schema is in place. Never migrates.
pub async fn check(pool: &PgPool) -> Result<bool> {
    ping(pool).await?;
    let present = users_table_exists(pool).await?;
    if !present {
        warn!("users table is missing");
    }
    Ok(present)
}
