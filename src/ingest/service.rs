use anyhow::Result;
use chrono::Local;
use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::mirror::MirrorWriter;
use crate::mqtt::payload::SensorPayload;

/// Capacity of the queue between the broker listener and the writer task.
/// Deep enough to absorb a database stall without dropping readings from a
/// single publishing station.
pub const INGEST_QUEUE_DEPTH: usize = 64;

pub struct IngestService {
    pool: SqlitePool,
    mirror: MirrorWriter,
}

impl IngestService {
    pub fn new(pool: SqlitePool, mirror: MirrorWriter) -> Self {
        Self { pool, mirror }
    }

    /// Drains the queue until every sender is gone. All writes go through
    /// this one task, so rows are committed in arrival order.
    pub async fn run(self, mut rx: mpsc::Receiver<SensorPayload>) {
        info!("Ingest writer started");
        while let Some(payload) = rx.recv().await {
            self.store(&payload).await;
        }
        info!("Ingest queue drained, writer stopping");
    }

    /// Persist one reading: capture the timestamp once, insert, mirror.
    /// The mirror line is written whether or not the insert succeeded, so
    /// the CSV is a complete record of everything that was decoded.
    pub async fn store(&self, payload: &SensorPayload) {
        let recorded_at = capture_timestamp();

        match self.insert(&recorded_at, payload).await {
            Ok(id) => info!(id, recorded_at = %recorded_at, "Reading persisted"),
            Err(e) => error!(error = %e, "Failed to persist reading"),
        }

        self.mirror.append(&recorded_at, payload).await;
    }

    async fn insert(&self, recorded_at: &str, payload: &SensorPayload) -> Result<i64> {
        let id = sqlx::query_scalar(
            r#"
            INSERT INTO readings
                (recorded_at, ahtx0_temp, ahtx0_humidity, bmp280_temp,
                 bmp280_pressure, light)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id
            "#,
        )
        .bind(recorded_at)
        .bind(payload.ahtx0_temp)
        .bind(payload.ahtx0_humidity)
        .bind(payload.bmp280_temp)
        .bind(payload.bmp280_pressure)
        .bind(payload.light)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}

/// Server-side capture time, `YYYY-MM-DD HH:MM:SS` local time. Taken exactly
/// once per message so the database row and the mirror line agree.
fn capture_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
