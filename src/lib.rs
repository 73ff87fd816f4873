//! Import current weather observations for one location and normalize them into
//! `WeatherObserved` entities.
//!
//! The provider exposes a pointer endpoint that answers with the URL where the current
//! observations live. A [`WeatherImporter`] resolves that URL, downloads the observation
//! array, keeps the stations whose composite location name starts with the configured
//! place, and maps each into a [`WeatherObserved`]. Publishing the entities is left to
//! the caller.

mod config;
mod error;
mod fetching;
mod importer;
mod transform;
mod types;

#[cfg(test)]
mod test_server;

pub use config::*;
pub use error::ImporterError;
pub use importer::*;

pub use fetching::error::RequestError;
pub use fetching::http_fetcher::{Auth, FetchResponse, HttpFetcher};
pub use fetching::resolver::{parse_pointer, resolve_data_url, DataPointer};

pub use transform::error::{DecodeError, Document, ParseError};
pub use transform::location_filter::{matches, primary_location, record_matches};
pub use transform::mapper::{entity_name, FieldMapper};
pub use transform::parser::parse_records;

pub use types::raw_observation::RawObservation;
pub use types::weather_observed::*;
