//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests for page bodies and image bytes
//! - Error classification (transport failure vs. non-success status)
//!
//! No retry happens here: a failed request surfaces to the caller, who can
//! resume the harvest later.

use crate::config::FetchConfig;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use image_harvester::config::FetchConfig;
/// use image_harvester::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the full body of a URL
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection, TLS, timeout, body read failure | `HarvestError::Fetch` |
/// | Non-2xx status | `HarvestError::HttpStatus` |
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, HarvestError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        })?;

    Ok(body.to_vec())
}

/// Fetches a page and returns its body as text
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// page with a stray bad byte still yields its links.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, HarvestError> {
    let body = fetch_bytes(client, url).await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
