//! Database connection management

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Test database connection
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Connect at startup, retrying a bounded number of times with a fixed delay.
/// The last error is returned once the attempts are exhausted.
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let delay = Duration::from_secs(config.connect_retry_secs);
    let mut attempt = 1;

    loop {
        let result = match create_pool(config).await {
            Ok(pool) => test_connection(&pool).await.map(|_| pool),
            Err(e) => Err(e),
        };

        match result {
            Ok(pool) => {
                tracing::info!(attempt, "Database connection successful");
                return Ok(pool);
            }
            Err(e) if attempt >= config.connect_attempts => {
                tracing::error!(
                    attempts = config.connect_attempts,
                    "Failed to connect to database, giving up: {}",
                    e
                );
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.connect_attempts,
                    retry_in_secs = config.connect_retry_secs,
                    "Database not ready: {}",
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

