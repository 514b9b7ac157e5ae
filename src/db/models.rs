use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    /// Capture time at the ingest host, `YYYY-MM-DD HH:MM:SS`, local time.
    pub recorded_at: String,
    /// Degrees Celsius
    pub ahtx0_temp: f64,
    /// Relative humidity percentage
    pub ahtx0_humidity: f64,
    /// Degrees Celsius
    pub bmp280_temp: f64,
    /// Pascals
    pub bmp280_pressure: f64,
    /// Illuminance in lux
    pub light: i64,
}
