//! Single-shot HTTP GET with status classification.

use crate::fetching::error::RequestError;
use bon::bon;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

/// Credentials attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Basic {
        username: String,
        password: Option<String>,
    },
    Bearer(String),
}

/// A successful (HTTP 200) response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Performs GET requests with a fixed timeout. Retries are left to the caller.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    insecure_client: Client,
    verify_tls: bool,
}

#[bon]
impl HttpFetcher {
    /// Creates a fetcher whose requests are bounded by `timeout`.
    ///
    /// `verify_tls` is the certificate validation default for requests that don't set `.verify()`.
    pub fn new(timeout: Duration, verify_tls: bool) -> Result<Self, RequestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RequestError::ClientBuild)?;
        let insecure_client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(RequestError::ClientBuild)?;
        Ok(Self {
            client,
            insecure_client,
            verify_tls,
        })
    }

    /// Sends one GET request to `url`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.url(&str)`: **Required.** The URL to request.
    /// * `.verify(bool)`: Optional. Overrides TLS certificate validation for this request.
    /// * `.headers(&HashMap<String, String>)`: Optional. Extra request headers.
    /// * `.auth(&Auth)`: Optional. Basic or bearer credentials.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Status`] when the response status is anything other than 200,
    /// with the response body as the message. Transport failures and timeouts are
    /// [`RequestError::Network`].
    #[builder]
    pub async fn fetch(
        &self,
        url: &str,
        verify: Option<bool>,
        headers: Option<&HashMap<String, String>>,
        auth: Option<&Auth>,
    ) -> Result<FetchResponse, RequestError> {
        let client = if verify.unwrap_or(self.verify_tls) {
            &self.client
        } else {
            &self.insecure_client
        };

        let mut request = client.get(url);
        if let Some(headers) = headers {
            for (name, value) in headers {
                request = request.header(name.as_str(), value.as_str());
            }
        }
        request = match auth {
            Some(Auth::Basic { username, password }) => {
                request.basic_auth(username, password.as_ref())
            }
            Some(Auth::Bearer(token)) => request.bearer_auth(token),
            None => request,
        };

        debug!("GET {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| RequestError::Network(url.to_string(), e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("HTTP {} from {}", status, url);
            // An unreadable body leaves the message empty.
            let message = response.text().await.unwrap_or_default();
            return Err(RequestError::Status {
                url: url.to_string(),
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestError::BodyRead(url.to_string(), e))?;

        debug!("Received {} bytes from {}", body.len(), url);
        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{canned, spawn_raw_server, spawn_server};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::get;
    use axum::Router;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5), true).unwrap()
    }

    #[tokio::test]
    async fn returns_body_on_200() -> Result<(), Box<dyn std::error::Error>> {
        let base = spawn_server(|_| Router::new().route("/ok", canned(AxumStatus::OK, "hello"))).await;

        let response = fetcher().fetch().url(&format!("{base}/ok")).call().await?;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "hello");
        Ok(())
    }

    #[tokio::test]
    async fn non_200_is_a_status_error_with_body() {
        let base = spawn_server(|_| {
            Router::new().route("/fail", canned(AxumStatus::INTERNAL_SERVER_ERROR, "upstream broke"))
        })
        .await;
        let url = format!("{base}/fail");

        let err = fetcher().fetch().url(&url).call().await.unwrap_err();

        match &err {
            RequestError::Status {
                url: failed_url,
                status_code,
                message,
            } => {
                assert_eq!(failed_url, &url);
                assert_eq!(*status_code, 500);
                assert_eq!(message, "upstream broke");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert_eq!(err.status_code(), Some(500));
        assert!(err.to_string().contains("status code: 500"));
    }

    #[tokio::test]
    async fn other_success_codes_are_still_errors() {
        let base =
            spawn_server(|_| Router::new().route("/empty", canned(AxumStatus::NO_CONTENT, ""))).await;

        let err = fetcher()
            .fetch()
            .url(&format!("{base}/empty"))
            .call()
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(204));
    }

    #[tokio::test]
    async fn sends_headers_and_auth() -> Result<(), Box<dyn std::error::Error>> {
        let base = spawn_server(|_| {
            Router::new().route(
                "/echo",
                get(|headers: HeaderMap| async move {
                    let api_key = headers
                        .get("api_key")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let authorization = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    format!("{api_key}|{authorization}")
                }),
            )
        })
        .await;
        let headers = HashMap::from([("api_key".to_string(), "secret".to_string())]);
        let auth = Auth::Bearer("token".to_string());

        let response = fetcher()
            .fetch()
            .url(&format!("{base}/echo"))
            .headers(&headers)
            .auth(&auth)
            .call()
            .await?;

        assert_eq!(response.body, "secret|Bearer token");
        Ok(())
    }

    #[tokio::test]
    async fn truncated_error_body_keeps_the_status() {
        let base = spawn_raw_server(
            b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\npartial",
        )
        .await;

        let err = fetcher()
            .fetch()
            .url(&format!("{base}/pointer"))
            .call()
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Status { status_code: 503, .. }));
        assert_eq!(err.status_code(), Some(503));
    }

    #[tokio::test]
    async fn sends_basic_auth() -> Result<(), Box<dyn std::error::Error>> {
        let base = spawn_server(|_| {
            Router::new().route(
                "/echo",
                get(|headers: HeaderMap| async move {
                    headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                }),
            )
        })
        .await;
        let auth = Auth::Basic {
            username: "user".to_string(),
            password: Some("pass".to_string()),
        };

        let response = fetcher()
            .fetch()
            .url(&format!("{base}/echo"))
            .auth(&auth)
            .call()
            .await?;

        assert_eq!(response.body, "Basic dXNlcjpwYXNz");
        Ok(())
    }

    #[tokio::test]
    async fn unverified_requests_use_the_insecure_client() -> Result<(), Box<dyn std::error::Error>>
    {
        let base = spawn_server(|_| Router::new().route("/ok", canned(AxumStatus::OK, "hello"))).await;

        let response = fetcher()
            .fetch()
            .url(&format!("{base}/ok"))
            .verify(false)
            .call()
            .await?;
        assert_eq!(response.body, "hello");

        let lenient = HttpFetcher::new(Duration::from_secs(5), false)?;
        let response = lenient
            .fetch()
            .url(&format!("{base}/ok"))
            .verify(true)
            .call()
            .await?;
        assert_eq!(response.body, "hello");
        Ok(())
    }

    #[tokio::test]
    async fn times_out_slow_responses() {
        let base = spawn_server(|_| {
            Router::new().route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
        })
        .await;
        let fetcher = HttpFetcher::new(Duration::from_millis(100), true).unwrap();

        let err = fetcher
            .fetch()
            .url(&format!("{base}/slow"))
            .call()
            .await
            .unwrap_err();

        assert!(matches!(err, RequestError::Network(_, ref e) if e.is_timeout()));
    }
}
