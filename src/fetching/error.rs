use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to retrieve data from URL: {url}, status code: {status_code}, message: {message}")]
    Status {
        url: String,
        status_code: u16,
        /// Upstream response body, kept for diagnosis.
        message: String,
    },

    // Connection failures and timeouts
    #[error("Network request failed for {0}")]
    Network(String, #[source] reqwest::Error),

    #[error("Failed to read response body from {0}")]
    BodyRead(String, #[source] reqwest::Error),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}

impl RequestError {
    /// HTTP status for `Status` errors, or the transport error's status if it carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestError::Status { status_code, .. } => Some(*status_code),
            RequestError::Network(_, e) | RequestError::BodyRead(_, e) => {
                e.status().map(|s| s.as_u16())
            }
            RequestError::ClientBuild(_) => None,
        }
    }
}
