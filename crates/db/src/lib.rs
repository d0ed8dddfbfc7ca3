//! Postgres access for facerate: pool setup, migrations, row models and
//! repositories over the `users`, `faces` and `ratings` tables plus the
//! `get_random_face` / `get_face_stats` stored functions.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// How long a query waits for a connection before failing with
/// `PoolTimedOut`. Must stay well under the HTTP request timeout so an
/// unreachable database surfaces as a backend error, not a request timeout.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool settings shared by [`create_pool`] and lazily-connected pools.
pub fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    pool_options().connect(database_url).await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
