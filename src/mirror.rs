//! Append-only CSV backup of every decoded reading.
//!
//! The mirror is written on the success *and* failure path of the database
//! insert; it is a full backup of what was ingested, not a fallback. It is
//! never read back by any component.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::mqtt::payload::SensorPayload;

/// Column header, matching the wire keys of the payload.
const HEADER: &str = "timestamp,AHTX0_Temp,AHTX0_Humidity,BMP280_Temp,BMP280_Pressure,Light";

pub struct MirrorWriter {
    path: PathBuf,
}

impl MirrorWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one reading. Errors are logged and swallowed; mirroring must
    /// never interrupt ingestion.
    pub async fn append(&self, recorded_at: &str, payload: &SensorPayload) {
        if let Err(e) = self.try_append(recorded_at, payload).await {
            warn!(path = %self.path.display(), error = %e, "mirror: failed to append reading");
        } else {
            debug!(path = %self.path.display(), "mirror: reading appended");
        }
    }

    async fn try_append(&self, recorded_at: &str, payload: &SensorPayload) -> Result<()> {
        // Only the single writer task ever appends, so the exists-check
        // cannot race with another writer.
        let add_header = !tokio::fs::try_exists(&self.path).await.unwrap_or(false);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open {}", self.path.display()))?;

        let mut chunk = String::new();
        if add_header {
            chunk.push_str(HEADER);
            chunk.push('\n');
        }
        chunk.push_str(&format!(
            "{},{},{},{},{},{}\n",
            recorded_at,
            payload.ahtx0_temp,
            payload.ahtx0_humidity,
            payload.bmp280_temp,
            payload.bmp280_pressure,
            payload.light,
        ));

        file.write_all(chunk.as_bytes()).await?;
        Ok(())
    }
}
