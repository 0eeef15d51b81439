use log::{debug, warn};
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;

/// A failed HTTP exchange with one of the remote sources.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection failure or timeout before a response arrived.
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but its body could not be read in full.
    #[error("Failed to read response body from {0}")]
    Body(String, #[source] reqwest::Error),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::NetworkRequest(_, e) | TransportError::Body(_, e) => e.is_timeout(),
            TransportError::HttpStatus { .. } => false,
        }
    }
}

/// Sends a GET request bounded by `timeout` and rejects non-success statuses.
pub(crate) async fn get(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<Response, TransportError> {
    debug!("GET {} (timeout {:?})", url, timeout);
    let response = client
        .get(url)
        .query(query)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| TransportError::NetworkRequest(url.to_string(), e))?;

    match response.error_for_status() {
        Ok(resp) => Ok(resp),
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            Err(if let Some(status) = e.status() {
                TransportError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                TransportError::NetworkRequest(url.to_string(), e)
            })
        }
    }
}

pub(crate) async fn get_text(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String, TransportError> {
    get(client, url, &[], timeout)
        .await?
        .text()
        .await
        .map_err(|e| TransportError::Body(url.to_string(), e))
}

pub(crate) async fn get_bytes(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<Vec<u8>, TransportError> {
    let bytes = get(client, url, query, timeout)
        .await?
        .bytes()
        .await
        .map_err(|e| TransportError::Body(url.to_string(), e))?;
    Ok(bytes.to_vec())
}
