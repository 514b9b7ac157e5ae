use anyhow::Result;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// SensorPayload
//
// One message body as the sensor station publishes it:
//
//   {"AHTX0_Temp": 21.9, "AHTX0_Humidity": 47.3, "BMP280_Temp": 22.4,
//    "BMP280_Pressure": 100180.5, "Light": 512}
//
// The wire keys are case-sensitive and all five are required; a message
// missing any of them is rejected as a whole. Unknown keys are ignored so
// firmware can add fields without breaking older ingesters.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorPayload {
    /// Degrees Celsius (AHTX0 temperature/humidity sensor).
    #[serde(rename = "AHTX0_Temp")]
    pub ahtx0_temp: f64,

    /// Relative humidity percentage (AHTX0).
    #[serde(rename = "AHTX0_Humidity")]
    pub ahtx0_humidity: f64,

    /// Degrees Celsius (BMP280 barometer).
    #[serde(rename = "BMP280_Temp")]
    pub bmp280_temp: f64,

    /// Pascals (BMP280).
    #[serde(rename = "BMP280_Pressure")]
    pub bmp280_pressure: f64,

    /// Illuminance in lux, always a whole number on the wire.
    #[serde(rename = "Light")]
    pub light: i64,
}

impl SensorPayload {
    /// Decode a raw message body.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(raw)?)
    }
}
