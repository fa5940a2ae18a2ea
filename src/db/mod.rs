//! Database module
//!
//! This module handles database connections, migrations, repositories and the store
//! the services talk to.

pub mod connection;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use store::{ExerciseStore, PgStore};

/// Run database migrations. Tables are created only when absent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
