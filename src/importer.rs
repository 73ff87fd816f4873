//! This module provides the main entry point: a [`WeatherImporter`] runs the
//! pointer → data → filter → map pipeline once per call and returns the
//! `WeatherObserved` entities for the configured location.

use crate::config::{ImporterConfig, RecordErrorPolicy};
use crate::error::ImporterError;
use crate::fetching::http_fetcher::HttpFetcher;
use crate::fetching::resolver::resolve_data_url;
use crate::transform::error::ParseError;
use crate::transform::location_filter::record_matches;
use crate::transform::mapper::FieldMapper;
use crate::transform::parser::parse_records;
use crate::types::weather_observed::WeatherObserved;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// A matching record that was left out of a run because it could not be mapped.
#[derive(Debug)]
pub struct SkippedRecord {
    pub station: Option<String>,
    pub error: ParseError,
}

/// The result of one run, including what was dropped along the way.
#[derive(Debug, Default)]
pub struct ImportRun {
    pub entities: Vec<WeatherObserved>,
    pub skipped: Vec<SkippedRecord>,
    /// Records returned by the data endpoint, matching or not.
    pub records_seen: usize,
}

/// Imports current observations for one location.
///
/// The importer holds no state between runs; calling [`WeatherImporter::run`] twice against
/// the same feed yields entities with the same names.
///
/// # Examples
///
/// ```rust,no_run
/// # use weather_observed::{ImporterConfig, ImporterError, WeatherImporter};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ImporterError> {
/// let config = ImporterConfig::builder()
///     .api_key("my-aemet-key")
///     .location_name("GRANADA")
///     .build();
/// let importer = WeatherImporter::new(config)?;
///
/// for entity in importer.run().await? {
///     println!("{} observed at {}", entity.name, entity.date_observed_iso());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeatherImporter {
    config: ImporterConfig,
    fetcher: HttpFetcher,
    mapper: FieldMapper,
}

impl WeatherImporter {
    /// Validates `config` and prepares the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ImporterError::Config`] for empty credentials, location or pointer URL, or a
    /// zero timeout, and [`ImporterError::Request`] if the HTTP client cannot be built.
    pub fn new(config: ImporterConfig) -> Result<Self, ImporterError> {
        config.validate()?;
        let fetcher = HttpFetcher::new(config.timeout, config.verify_tls)?;
        let mapper = FieldMapper::new(config.provider_name.clone(), config.pointer_url.clone());
        Ok(Self {
            config,
            fetcher,
            mapper,
        })
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    fn pointer_headers(&self) -> HashMap<String, String> {
        HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("api_key".to_string(), self.config.api_key.clone()),
        ])
    }

    /// Runs the pipeline once and returns the entities for the configured location.
    ///
    /// An empty list is a normal outcome: either the provider had no data this cycle or
    /// no station matched.
    ///
    /// # Errors
    ///
    /// * [`ImporterError::Request`] if either endpoint answers with a non-200 status or the
    ///   request fails.
    /// * [`ImporterError::Decode`] if a body is not the expected JSON shape.
    /// * [`ImporterError::Record`] for a malformed record, only under
    ///   [`RecordErrorPolicy::Abort`].
    pub async fn run(&self) -> Result<Vec<WeatherObserved>, ImporterError> {
        Ok(self.run_detailed().await?.entities)
    }

    /// Like [`WeatherImporter::run`], but also reports skipped records.
    pub async fn run_detailed(&self) -> Result<ImportRun, ImporterError> {
        let Some(data_url) =
            resolve_data_url(&self.fetcher, &self.config.pointer_url, &self.pointer_headers())
                .await?
        else {
            info!("No data available for {} this cycle", self.config.location_name);
            return Ok(ImportRun::default());
        };

        let response = self.fetcher.fetch().url(&data_url).call().await?;
        let records = parse_records(&response.body)?;
        info!("Parsed {} observations from {}", records.len(), data_url);

        self.transform(&records)
    }

    /// Runs the pipeline unless `token` is cancelled first.
    ///
    /// Cancellation drops the in-flight request; no partial result is returned.
    ///
    /// # Errors
    ///
    /// [`ImporterError::Cancelled`] if the token fires before the run completes, otherwise the
    /// same errors as [`WeatherImporter::run`].
    pub async fn run_until_cancelled(
        &self,
        token: &CancellationToken,
    ) -> Result<Vec<WeatherObserved>, ImporterError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Import for {} cancelled", self.config.location_name);
                Err(ImporterError::Cancelled)
            }
            result = self.run() => result,
        }
    }

    /// Filters `records` to the configured location and maps each match.
    ///
    /// Records from other locations are never decoded, so their contents cannot fail the run.
    pub fn transform(&self, records: &[Value]) -> Result<ImportRun, ImporterError> {
        let location = self.config.location_name.as_str();
        let mut run = ImportRun {
            records_seen: records.len(),
            ..Default::default()
        };

        for record in records.iter().filter(|record| record_matches(record, location)) {
            let station = record
                .get("idema")
                .and_then(Value::as_str)
                .map(str::to_string);
            match self.mapper.map_record(record, location) {
                Ok(entity) => {
                    debug!("Mapped {}", entity.name);
                    run.entities.push(entity);
                }
                Err(error) => match self.config.record_error_policy {
                    RecordErrorPolicy::Skip => {
                        warn!("Skipping observation from station {:?}: {}", station, error);
                        run.skipped.push(SkippedRecord { station, error });
                    }
                    RecordErrorPolicy::Abort => {
                        return Err(ImporterError::Record {
                            station: station.unwrap_or_default(),
                            source: error,
                        });
                    }
                },
            }
        }

        info!(
            "{} of {} observations matched {} ({} skipped)",
            run.entities.len() + run.skipped.len(),
            run.records_seen,
            location,
            run.skipped.len()
        );
        Ok(run)
    }
}
