use crate::adapters::records::decode_json;
use crate::domain::model::Listing;
use crate::domain::ports::ListingProvider;
use crate::utils::error::{ListingError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Exponential backoff for transient fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay,
        }
    }

    /// Delay before retry number `retry` (1-based): base, 2x base, 4x base, ...
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

/// Fetches a JSON array of listings with a GET request.
#[derive(Debug, Clone)]
pub struct HttpListings {
    client: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl HttpListings {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            retry,
        })
    }

    async fn fetch_once(&self) -> Result<serde_json::Value> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let document = response.error_for_status()?.json().await?;
        Ok(document)
    }
}

#[async_trait]
impl ListingProvider for HttpListings {
    async fn list_all(&self) -> Result<Vec<Listing>> {
        let mut attempt = 1;
        loop {
            match self.fetch_once().await {
                Ok(document) => return decode_json(document, &self.endpoint),
                Err(e) if e.is_retryable() && attempt < self.retry.attempts => {
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        "🔄 Fetch attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt,
                        self.retry.attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) if e.is_retryable() => {
                    return Err(ListingError::FetchExhaustedError {
                        attempts: attempt,
                        message: e.to_string(),
                    })
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn source_name(&self) -> &str {
        &self.endpoint
    }
}
