//! The observation record as delivered by the provider's data endpoint.

use serde::{Deserialize, Serialize};

/// One station's reading at one timestamp, as found in the data endpoint's JSON array.
///
/// Field names follow the provider's abbreviations. Every field is optional; stations
/// report only what their sensors measure.
///
/// ```
/// use weather_observed::RawObservation;
///
/// let raw: RawObservation = serde_json::from_str(
///     r#"{"idema": "5530E", "ubi": "GRANADA/AEROPUERTO", "fint": "2023-06-29T20:00:00", "ta": 31.9}"#,
/// ).unwrap();
/// assert_eq!(raw.station_id.as_deref(), Some("5530E"));
/// assert_eq!(raw.temperature, Some(31.9));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Station identifier (e.g. "5530E").
    #[serde(rename = "idema")]
    pub station_id: Option<String>,
    /// Composite location name, e.g. "GRANADA/AEROPUERTO".
    #[serde(rename = "ubi")]
    pub location_name: Option<String>,
    #[serde(rename = "lon")]
    pub longitude: Option<f64>,
    #[serde(rename = "lat")]
    pub latitude: Option<f64>,
    /// Local observation time without timezone suffix, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(rename = "fint")]
    pub observed_at: Option<String>,
    #[serde(rename = "ta")]
    pub temperature: Option<f64>,
    #[serde(rename = "tamin")]
    pub temperature_min: Option<f64>,
    #[serde(rename = "tamax")]
    pub temperature_max: Option<f64>,
    #[serde(rename = "pres")]
    pub pressure: Option<f64>,
    #[serde(rename = "pres_nmar")]
    pub pressure_sea_level: Option<f64>,
    /// Maximum wind speed.
    #[serde(rename = "vmax")]
    pub wind_speed_max: Option<f64>,
    #[serde(rename = "dv")]
    pub wind_direction: Option<f64>,
    /// Relative humidity on a 0-100 scale.
    #[serde(rename = "hr")]
    pub relative_humidity: Option<f64>,
    #[serde(rename = "prec")]
    pub precipitation: Option<f64>,
    #[serde(rename = "nieve")]
    pub snow_height: Option<f64>,
}
