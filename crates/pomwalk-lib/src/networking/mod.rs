use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

pub mod cache;
pub mod retry;

pub use cache::MetadataCache;
pub use retry::{RetryPolicy, RetryingClient};

/// Networking errors below the resolution layer
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP request failed: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    UnsuccessfulStatus { url: String, status: StatusCode },

    #[error("Request to {url} cannot be retried (streaming body)")]
    UncloneableRequest { url: String },

    #[error("Cache error: {message}")]
    CacheError { message: String },
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// HTTP client timeout in seconds
    pub timeout_seconds: u64,
    /// Retry policy for document fetches
    pub retry: RetryPolicy,
    /// Enable request/response tracing
    pub trace_requests: bool,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            retry: RetryPolicy::default(),
            trace_requests: false,
        }
    }
}

/// Owns the shared HTTP client for a process
pub struct NetworkingManager {
    client: Client,
    config: NetworkingConfig,
}

impl NetworkingManager {
    /// Build the HTTP client with timeout and user agent
    pub fn new(config: NetworkingConfig) -> Result<Self, NetworkingError> {
        trace!("Initializing networking manager");

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("pomwalk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        trace!(
            "Networking manager initialized (timeout {}s, {} retries, backoff {:?})",
            config.timeout_seconds, config.retry.max_retries, config.retry.backoff
        );

        Ok(Self { client, config })
    }

    /// Client that applies the configured retry policy
    pub fn retrying_client(&self) -> RetryingClient {
        RetryingClient::with_policy(self.client.clone(), self.config.retry.clone())
            .with_tracing(self.config.trace_requests)
    }

    /// Get HTTP client for manual requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &NetworkingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
