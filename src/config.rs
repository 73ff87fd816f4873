//! Run configuration supplied by the host.

use bon::Builder;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PROVIDER_NAME: &str = "AEMET";
pub const DEFAULT_POINTER_URL: &str =
    "https://opendata.aemet.es/opendata/api/observacion/convencional/todas";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What a run does when a single record cannot be mapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordErrorPolicy {
    /// Drop the record, log it and keep going.
    #[default]
    Skip,
    /// Fail the whole run with [`crate::ImporterError::Record`].
    Abort,
}

/// Everything a [`crate::WeatherImporter`] needs for one location.
///
/// # Examples
///
/// ```
/// use weather_observed::ImporterConfig;
/// use std::time::Duration;
///
/// let config = ImporterConfig::builder()
///     .api_key("my-key")
///     .location_name("GRANADA")
///     .timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.provider_name, "AEMET");
/// ```
///
/// It can also be deserialized; `timeout_secs` is whole seconds:
///
/// ```
/// use weather_observed::ImporterConfig;
///
/// let config: ImporterConfig = serde_json::from_str(
///     r#"{"api_key": "k", "location_name": "MADRID", "timeout_secs": 5}"#,
/// ).unwrap();
/// assert_eq!(config.timeout.as_secs(), 5);
/// ```
#[derive(Clone, Builder, Deserialize)]
pub struct ImporterConfig {
    /// Sent as the `api_key` header to the pointer endpoint.
    #[builder(into)]
    pub api_key: String,
    /// Primary place name stations are matched against, e.g. "GRANADA".
    #[builder(into)]
    pub location_name: String,
    /// Written to each entity's `dataProvider`.
    #[builder(into, default = DEFAULT_PROVIDER_NAME.to_string())]
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
    /// Endpoint returning the data URL; also written to each entity's `source`.
    #[builder(into, default = DEFAULT_POINTER_URL.to_string())]
    #[serde(default = "default_pointer_url")]
    pub pointer_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "deserialize_secs"
    )]
    pub timeout: Duration,
    #[builder(default = true)]
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    #[builder(default)]
    #[serde(default)]
    pub record_error_policy: RecordErrorPolicy,
}

impl std::fmt::Debug for ImporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImporterConfig")
            .field("api_key", &"<redacted>")
            .field("location_name", &self.location_name)
            .field("provider_name", &self.provider_name)
            .field("pointer_url", &self.pointer_url)
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .field("record_error_policy", &self.record_error_policy)
            .finish()
    }
}

impl ImporterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Empty("api_key"));
        }
        if self.location_name.is_empty() {
            return Err(ConfigError::Empty("location_name"));
        }
        if self.pointer_url.trim().is_empty() {
            return Err(ConfigError::Empty("pointer_url"));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration value '{0}' must not be empty")]
    Empty(&'static str),

    #[error("Request timeout must be greater than zero")]
    ZeroTimeout,
}

fn default_provider_name() -> String {
    DEFAULT_PROVIDER_NAME.to_string()
}

fn default_pointer_url() -> String {
    DEFAULT_POINTER_URL.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_verify_tls() -> bool {
    true
}

fn deserialize_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
