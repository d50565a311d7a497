//! Release server client.
//!
//! Fetches the repository tags listing and turns it into releases. Handles
//! request/response processing, error mapping, and retry logic.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::error::{ReleaseError, Result};
use super::release::Release;
use super::types::Tag;

/// Maximum number of attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// User agent sent with every request; the GitHub API rejects requests
/// without one.
const USER_AGENT: &str = concat!("playcmd/", env!("CARGO_PKG_VERSION"));

/// Client for the tags endpoint.
#[derive(Debug)]
pub struct ReleaseClient {
    /// The HTTP client.
    client: Client,
    /// Endpoint listing release tags.
    tags_url: String,
}

impl ReleaseClient {
    /// Create a client for the given tags endpoint.
    pub fn new(tags_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ReleaseError::Network)?;

        Ok(Self {
            client,
            tags_url: tags_url.to_string(),
        })
    }

    /// Fetch every published release.
    #[instrument(skip(self), fields(url = %self.tags_url))]
    pub async fn fetch_releases(&self) -> Result<Vec<Release>> {
        let tags = self.fetch_tags().await?;
        info!("Fetched {} release tags", tags.len());
        Ok(tags.iter().map(|tag| Release::new(&tag.name)).collect())
    }

    /// Fetch the raw tag listing.
    ///
    /// Includes retry logic for transient failures (rate limiting, server
    /// errors, connection problems).
    pub async fn fetch_tags(&self) -> Result<Vec<Tag>> {
        let mut attempts = 0;
        let mut last_error: Option<ReleaseError> = None;

        while attempts < MAX_RETRIES {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, MAX_RETRIES);

            match self.execute_get().await {
                Ok(tags) => return Ok(tags),
                Err(e) => {
                    if Self::is_retryable(&e) && attempts < MAX_RETRIES {
                        let delay = Self::calculate_retry_delay(attempts);
                        warn!(
                            "Request failed (attempt {}), retrying in {}ms: {}",
                            attempts, delay, e
                        );
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or(ReleaseError::ServerError("Max retries exceeded".to_string())))
    }

    /// Execute a single GET request.
    async fn execute_get(&self) -> Result<Vec<Tag>> {
        let response = self
            .client
            .get(&self.tags_url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Check the status and parse the JSON body.
    async fn handle_response(response: Response) -> Result<Vec<Tag>> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<Vec<Tag>>()
                .await
                .map_err(|e| ReleaseError::InvalidResponse(format!("Failed to parse tags: {}", e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            Err(Self::error_from_response(status, &url, &body))
        }
    }

    /// Create an error from an HTTP response, preferring the server's own
    /// `message` field as context.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ReleaseError {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(str::to_string));

        match message {
            Some(message) if !message.is_empty() => ReleaseError::from_status(status, &message),
            _ => ReleaseError::from_status(status, url),
        }
    }

    /// Check if an error is retryable.
    fn is_retryable(error: &ReleaseError) -> bool {
        matches!(
            error,
            ReleaseError::RateLimited | ReleaseError::ServerError(_) | ReleaseError::Network(_)
        )
    }

    /// Calculate retry delay with exponential backoff.
    fn calculate_retry_delay(attempt: u32) -> u64 {
        RETRY_DELAY_MS * 2u64.pow(attempt - 1)
    }
}
