use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub mqtt_host: String,
    pub mqtt_port: u16,
    /// Topic the sensor station publishes readings to.
    pub mqtt_topic: String,
    pub mqtt_client_id: String,
    /// Delay between reconnect attempts after a broker connection error,
    /// in seconds. The listener retries forever.
    pub mqtt_reconnect_secs: u64,
    /// Path of the SQLite database file, created on first start.
    pub database_path: String,
    /// Path of the append-only CSV backup of every decoded reading.
    pub mirror_path: String,
    pub server_host: String,
    pub server_port: u16,
    /// Directory the front-end assets are served from.
    pub static_dir: String,
}

impl Config {
    /// Every key has a default, so an empty environment yields a working
    /// local setup (broker on localhost, files in the working directory).
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            mqtt_host: optional("MQTT_HOST", "localhost"),
            mqtt_port: optional("MQTT_PORT", "1883")
                .parse()
                .context("MQTT_PORT must be a valid port number")?,
            mqtt_topic: optional("MQTT_TOPIC", "sensors/data"),
            mqtt_client_id: optional("MQTT_CLIENT_ID", "enviro-ingest"),
            mqtt_reconnect_secs: optional("MQTT_RECONNECT_SECS", "5")
                .parse()
                .context("MQTT_RECONNECT_SECS must be a positive integer")?,
            database_path: optional("DATABASE_PATH", "sensor_data.db"),
            mirror_path: optional("MIRROR_PATH", "sensor_data.csv"),
            server_host: optional("SERVER_HOST", "0.0.0.0"),
            server_port: optional("SERVER_PORT", "5000")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            static_dir: optional("STATIC_DIR", "static"),
        })
    }
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
