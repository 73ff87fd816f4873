//! Converts raw provider records into `WeatherObserved` entities.

use crate::transform::error::ParseError;
use crate::types::raw_observation::RawObservation;
use crate::types::weather_observed::{GeoLocation, WeatherObserved};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

/// Format of the provider's local, timezone-less observation timestamp.
pub(crate) const RAW_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Entity name for a station observed at `location_name`.
pub fn entity_name(location_name: &str, station_id: &str) -> String {
    format!("{}-WO-{}", location_name, station_id)
}

/// Maps raw records to entities, stamping each with the same provider metadata.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    data_provider: String,
    source: String,
}

impl FieldMapper {
    pub fn new(data_provider: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            data_provider: data_provider.into(),
            source: source.into(),
        }
    }

    /// Decodes an undecoded provider record and maps it.
    ///
    /// # Errors
    ///
    /// [`ParseError::Malformed`] when a field has the wrong type, otherwise as [`FieldMapper::map`].
    pub fn map_record(
        &self,
        record: &Value,
        location_name: &str,
    ) -> Result<WeatherObserved, ParseError> {
        let raw = RawObservation::deserialize(record).map_err(ParseError::Malformed)?;
        self.map(&raw, location_name)
    }

    /// Builds a fresh entity from `raw`.
    ///
    /// The timestamp is re-labelled as UTC without shifting it: `2023-06-29T20:00:00`
    /// becomes `2023-06-29T20:00:00Z`. Relative humidity is scaled from 0-100 to 0-1 and
    /// dropped when zero. Missing measurements stay `None`.
    ///
    /// # Errors
    ///
    /// [`ParseError`] when the record has no station id or its timestamp is missing or malformed.
    pub fn map(
        &self,
        raw: &RawObservation,
        location_name: &str,
    ) -> Result<WeatherObserved, ParseError> {
        let station_id = raw
            .station_id
            .as_deref()
            .ok_or(ParseError::MissingStationId)?;
        let observed_at = raw
            .observed_at
            .as_deref()
            .ok_or(ParseError::MissingTimestamp)?;
        let date_observed = NaiveDateTime::parse_from_str(observed_at, RAW_TIMESTAMP_FORMAT)
            .map_err(|source| ParseError::InvalidTimestamp {
                value: observed_at.to_string(),
                source,
            })?
            .and_utc();

        let location = match (raw.longitude, raw.latitude) {
            (Some(lon), Some(lat)) => Some(GeoLocation::point(lon, lat)),
            _ => None,
        };

        Ok(WeatherObserved {
            name: entity_name(location_name, station_id),
            location,
            address: String::new(),
            area_served: raw.location_name.clone(),
            temperature: raw.temperature,
            temperature_minimum: raw.temperature_min,
            temperature_maximum: raw.temperature_max,
            atmospheric_pressure: raw.pressure,
            atmospheric_pressure_sea_level: raw.pressure_sea_level,
            relative_humidity: raw
                .relative_humidity
                .filter(|hr| *hr != 0.0 && !hr.is_nan())
                .map(|hr| hr / 100.0),
            wind_speed: raw.wind_speed_max,
            wind_direction: raw.wind_direction,
            snow_height: raw.snow_height,
            rain_total_sum_10: raw.precipitation,
            date_observed,
            data_provider: self.data_provider.clone(),
            source: self.source.clone(),
        })
    }
}
