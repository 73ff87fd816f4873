use crate::transform::error::{DecodeError, Document};
use serde_json::Value;

/// Decodes the data endpoint's body as a JSON array of observation records.
///
/// Records stay untyped here so a badly typed field only affects its own record;
/// they are converted to [`crate::RawObservation`] when mapped. An empty array is
/// valid and yields no records.
pub fn parse_records(body: &str) -> Result<Vec<Value>, DecodeError> {
    serde_json::from_str(body).map_err(|e| DecodeError::new(Document::Observations, e))
}
