//! Broker-to-database ingestion process: subscribes to the sensor topic and
//! feeds decoded readings through a bounded queue into a single writer task.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use enviro_station::{
    config::Config,
    db,
    ingest::{IngestService, INGEST_QUEUE_DEPTH},
    mirror::MirrorWriter,
    mqtt::BrokerListener,
    shutdown_signal,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env (ignore error if file absent — env vars may be set externally)
    let _ = dotenvy::dotenv();

    // Initialise tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_path).await?;
    db::init_schema(&pool).await?;
    info!(path = %config.database_path, "Database ready");

    let (tx, rx) = mpsc::channel(INGEST_QUEUE_DEPTH);

    // Single writer task; every insert and mirror append goes through it.
    let service = IngestService::new(pool, MirrorWriter::new(&config.mirror_path));
    let writer = tokio::spawn(service.run(rx));

    let listener = BrokerListener::new(&config);
    let listener_task = tokio::spawn(listener.run(tx));

    shutdown_signal().await;

    // Stop consuming broker events; the writer drains whatever is queued.
    listener_task.abort();
    if let Err(e) = writer.await {
        tracing::error!(error = %e, "Ingest writer did not stop cleanly");
    }
    info!("Ingest service stopped");

    Ok(())
}
