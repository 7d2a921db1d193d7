//! Postgres pool construction and a deadline-bounded health check.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
pub enum CustomDatabaseError {
    #[error("Pg error: {0}")]
    Other(#[from] sqlx::Error),

    #[error("Client timeout error")]
    Timeout(#[from] tokio::time::error::Elapsed),
}

/// Build a connection pool. Acquire fails fast so a down database surfaces
/// in the readiness probe instead of piling up waiters.
pub async fn get_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .connect(url)
        .await
}

/// `SELECT 1` under a short deadline; `Ok(())` means the database is
/// reachable and answering queries.
pub async fn health_check(pool: &PgPool) -> Result<(), CustomDatabaseError> {
    tokio::time::timeout(HEALTH_CHECK_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await??;
    Ok(())
}
