pub mod models;

use std::time::Duration;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

/// The single table both services share. Applied with `IF NOT EXISTS` at
/// startup; there is no migration machinery.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS readings (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    recorded_at     TEXT    NOT NULL,
    ahtx0_temp      REAL    NOT NULL,
    ahtx0_humidity  REAL    NOT NULL,
    bmp280_temp     REAL    NOT NULL,
    bmp280_pressure REAL    NOT NULL,
    light           INTEGER NOT NULL
)";

pub async fn create_pool(database_path: &str) -> Result<SqlitePool> {
    let opts = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        // WAL lets the query process read while the ingester writes.
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    // One connection per process: SQLite serializes writers anyway, and a
    // single connection avoids "database is locked" errors from within.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}
