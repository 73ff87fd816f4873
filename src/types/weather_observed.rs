//! The normalized `WeatherObserved` entity handed to downstream sinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Model identifier sinks use to route `WeatherObserved` entities.
pub const WEATHER_OBSERVED_MODEL: &str = "weather.WeatherObserved";

/// Output format for `dateObserved`: ISO-8601 with a literal `Z` suffix.
pub(crate) const DATE_OBSERVED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A GeoJSON point geometry. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoLocation {
    Point { coordinates: [f64; 2] },
}

impl GeoLocation {
    pub fn point(longitude: f64, latitude: f64) -> Self {
        GeoLocation::Point {
            coordinates: [longitude, latitude],
        }
    }
}

/// One station's observation, normalized to the `WeatherObserved` schema.
///
/// Measurements the station did not report are `None` and omitted when serialized.
/// `relative_humidity` is on a 0-1 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObserved {
    /// `"{location}-WO-{station_id}"`; stable across runs for the same station.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_served: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atmospheric_pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atmospheric_pressure_sea_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snow_height: Option<f64>,
    #[serde(rename = "rainTotalSum10", skip_serializing_if = "Option::is_none")]
    pub rain_total_sum_10: Option<f64>,
    #[serde(serialize_with = "serialize_date_observed")]
    pub date_observed: DateTime<Utc>,
    pub data_provider: String,
    pub source: String,
}

impl WeatherObserved {
    /// `date_observed` rendered the way it is serialized, e.g. `2023-06-29T20:00:00Z`.
    pub fn date_observed_iso(&self) -> String {
        self.date_observed.format(DATE_OBSERVED_FORMAT).to_string()
    }

    /// Wraps the entity in the `{model_name, data}` envelope expected by context brokers.
    pub fn into_model(self) -> SmartDataModel {
        SmartDataModel {
            model_name: WEATHER_OBSERVED_MODEL.to_string(),
            data: self,
        }
    }
}

fn serialize_date_observed<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(DATE_OBSERVED_FORMAT))
}

/// A `WeatherObserved` entity tagged with its data model name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmartDataModel {
    pub model_name: String,
    pub data: WeatherObserved,
}
