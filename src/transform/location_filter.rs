use crate::types::raw_observation::RawObservation;
use serde_json::Value;

const LOCATION_SEPARATORS: [char; 2] = ['-', '/'];

/// The place name before the first `-` or `/` of a composite location,
/// e.g. "GRANADA" for "GRANADA/AEROPUERTO".
pub fn primary_location(composite: &str) -> &str {
    composite
        .split(&LOCATION_SEPARATORS[..])
        .next()
        .unwrap_or(composite)
}

/// Whether `raw` was observed at `target_location`. Case-sensitive; records without a
/// location never match. Several stations may share a primary name and all of them match.
pub fn matches(raw: &RawObservation, target_location: &str) -> bool {
    location_matches(raw.location_name.as_deref(), target_location)
}

/// [`matches`] for an undecoded record, reading its `ubi` field. A non-string `ubi`
/// counts as missing.
pub fn record_matches(record: &Value, target_location: &str) -> bool {
    location_matches(record.get("ubi").and_then(Value::as_str), target_location)
}

fn location_matches(location_name: Option<&str>, target_location: &str) -> bool {
    location_name.is_some_and(|name| primary_location(name) == target_location)
}
