//! HTTP client for the homework review API.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors a single fetch can produce. None of these terminate the process;
/// the poll loop logs them and retries the same window next cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to review API failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("review API returned status {status} ({reason}), expected 200")]
    RemoteStatus { status: u16, reason: String },
    #[error("review API response body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),
}

pub struct ReviewClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl ReviewClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            token,
        }
    }

    /// Fetch homework statuses updated since `cursor` (unix seconds).
    ///
    /// Returns the raw JSON document; shape checking belongs to
    /// [`crate::validate`]. No retries at this layer.
    pub async fn fetch(&self, cursor: i64) -> Result<Value, FetchError> {
        debug!("Fetching homework statuses from_date={}", cursor);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", cursor)])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::RemoteStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let raw = response.json().await.map_err(FetchError::Decode)?;
        debug!("Review API response received");
        Ok(raw)
    }
}
