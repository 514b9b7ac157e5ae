use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::Reading;

/// One reading as `/api/data` exposes it.
///
/// The stored `bmp280_temp` column is not part of the response: the display
/// reads its temperature from the AHTX0 sensor only, and the endpoint keeps
/// that contract. The remaining keys reuse the exact wire names the station
/// publishes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    /// Capture time, `YYYY-MM-DD HH:MM:SS` local time.
    pub timestamp: String,
    /// Store-assigned row id, strictly increasing in insertion order.
    pub id: i64,
    /// Degrees Celsius
    #[serde(rename = "AHTX0_Temp")]
    pub ahtx0_temp: f64,
    /// Relative humidity percentage
    #[serde(rename = "AHTX0_Humidity")]
    pub ahtx0_humidity: f64,
    /// Pascals
    #[serde(rename = "BMP280_Pressure")]
    pub bmp280_pressure: f64,
    /// Illuminance in lux
    #[serde(rename = "Light")]
    pub light: i64,
}

impl From<Reading> for ReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            timestamp: r.recorded_at,
            id: r.id,
            ahtx0_temp: r.ahtx0_temp,
            ahtx0_humidity: r.ahtx0_humidity,
            bmp280_pressure: r.bmp280_pressure,
            light: r.light,
        }
    }
}
