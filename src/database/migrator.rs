use crate::error::Result;
use sqlx::SqlitePool;
use tracing::info;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Applies every pending schema version. Versions already recorded in the
/// ledger are skipped; any other failure aborts startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations");
    MIGRATOR.run(pool).await?;

    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;
    info!(version = version.unwrap_or(0), "Database schema is up to date");
    Ok(())
}
