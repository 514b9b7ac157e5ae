//! HTTP process serving the reading history and the front-end assets.

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use enviro_station::{api, config::Config, db, shutdown_signal};

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

    // Create the schema here too, so the query side starts cleanly on a
    // fresh deployment where the ingester has not run yet.
    let pool = db::create_pool(&config.database_path).await?;
    db::init_schema(&pool).await?;
    info!(path = %config.database_path, "Database ready");

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, static_dir = %config.static_dir, "HTTP server listening");

    axum::serve(listener, api::router(pool, &config.static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
