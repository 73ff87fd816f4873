//! Resolves the pointer endpoint's envelope to the URL where the data currently lives.

use crate::fetching::http_fetcher::HttpFetcher;
use crate::transform::error::{DecodeError, Document};
use crate::ImporterError;
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;

/// The envelope returned by the pointer endpoint.
///
/// ```json
/// {"descripcion": "exito", "estado": 200, "datos": "https://...", "metadatos": "https://..."}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DataPointer {
    pub descripcion: Option<String>,
    pub estado: Option<i64>,
    pub datos: Option<String>,
    pub metadatos: Option<String>,
}

impl DataPointer {
    /// The data URL, if one is present and non-empty.
    pub fn data_url(&self) -> Option<&str> {
        self.datos.as_deref().filter(|url| !url.is_empty())
    }
}

pub fn parse_pointer(body: &str) -> Result<DataPointer, DecodeError> {
    serde_json::from_str(body).map_err(|e| DecodeError::new(Document::Pointer, e))
}

/// Calls the pointer endpoint and returns the data URL it points to.
///
/// `Ok(None)` means the provider has no data this cycle; it is not an error.
pub async fn resolve_data_url(
    fetcher: &HttpFetcher,
    pointer_url: &str,
    headers: &HashMap<String, String>,
) -> Result<Option<String>, ImporterError> {
    let response = fetcher
        .fetch()
        .url(pointer_url)
        .headers(headers)
        .call()
        .await?;
    let pointer = parse_pointer(&response.body)?;

    match pointer.data_url() {
        Some(url) => {
            info!("Pointer endpoint resolved data URL {}", url);
            Ok(Some(url.to_string()))
        }
        None => {
            warn!(
                "Pointer endpoint returned no data URL (estado: {:?}, descripcion: {:?})",
                pointer.estado, pointer.descripcion
            );
            Ok(None)
        }
    }
}
