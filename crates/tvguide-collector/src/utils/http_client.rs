//! HTTP client wrapper for channel sites
//!
//! Thin layer over reqwest shared by all source handlers: connect-timeout
//! defaults, uniform non-2xx error mapping, and the handful of request
//! shapes the sites actually need (GET text, GET JSON, form POST).

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};

/// Shared HTTP client for source handlers
///
/// Cheap to clone; the underlying reqwest client is reference-counted.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with the default 10s connection timeout
    pub fn new() -> Self {
        Self::with_connect_timeout(Duration::from_secs(10))
    }

    /// Create a client with only a connection timeout (no total request
    /// timeout), so slow schedule pages can still finish transferring
    pub fn with_connect_timeout(connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch URL and return the response body as text
    pub async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        debug!("Fetching text content from: {}", url);
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response, url)?;
        Ok(response.text().await?)
    }

    /// Fetch URL and deserialize the response body as JSON
    pub async fn fetch_json<T: DeserializeOwned + Send>(&self, url: &str) -> SourceResult<T> {
        debug!("Fetching JSON content from: {}", url);
        let response = self.client.get(url).send().await?;
        let response = Self::check_status(response, url)?;
        Ok(response.json::<T>().await?)
    }

    /// POST a pre-encoded form body and deserialize the JSON response
    pub async fn post_form_json<T: DeserializeOwned + Send>(
        &self,
        url: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> SourceResult<T> {
        debug!("Posting form data to: {}", url);
        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let response = Self::check_status(response, url)?;
        Ok(response.json::<T>().await?)
    }

    fn check_status(response: Response, url: &str) -> SourceResult<Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: format!(
                    "{} - URL: {}",
                    status.canonical_reason().unwrap_or("Unknown"),
                    url
                ),
            });
        }
        Ok(response)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
