use reqwest::{Client, Request, Response};
use std::future::Future;
use std::time::Duration;
use tracing::{trace, warn};

use super::NetworkingError;

/// Fixed-interval retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Wait before each retry
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_secs(1),
        }
    }
}

/// HTTP client that retries non-success responses and transport errors
#[derive(Debug, Clone)]
pub struct RetryingClient {
    client: Client,
    policy: RetryPolicy,
    trace_requests: bool,
}

impl RetryingClient {
    /// Create a retrying client with the default policy
    pub fn new(client: Client) -> Self {
        Self::with_policy(client, RetryPolicy::default())
    }

    /// Create a retrying client with a custom policy
    pub fn with_policy(client: Client, policy: RetryPolicy) -> Self {
        Self {
            client,
            policy,
            trace_requests: false,
        }
    }

    pub fn with_tracing(mut self, trace_requests: bool) -> Self {
        self.trace_requests = trace_requests;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Execute a request, returning the first successful response.
    ///
    /// The last failure is returned once retries are exhausted: either
    /// `UnsuccessfulStatus` or the transport error.
    pub async fn execute(&self, request: Request) -> Result<Response, NetworkingError> {
        self.execute_with(request, |response| async move {
            Ok::<_, reqwest::Error>(response)
        })
        .await
    }

    /// Like [`execute`](Self::execute), but `read` consumes each successful
    /// response inside the retry loop, so a body that fails mid-transfer is
    /// retried like any other transport error.
    pub async fn execute_with<T, R, Fut>(
        &self,
        request: Request,
        read: R,
    ) -> Result<T, NetworkingError>
    where
        R: Fn(Response) -> Fut,
        Fut: Future<Output = Result<T, reqwest::Error>>,
    {
        let url = request.url().to_string();
        let mut retry_count = 0;

        loop {
            let attempt = request
                .try_clone()
                .ok_or_else(|| NetworkingError::UncloneableRequest { url: url.clone() })?;

            if self.trace_requests {
                trace!("{} {} (attempt {})", attempt.method(), url, retry_count + 1);
            }

            let failure = match self.client.execute(attempt).await {
                Ok(response) if response.status().is_success() => {
                    let status = response.status();
                    match read(response).await {
                        Ok(value) => {
                            trace!("{} -> {}", url, status);
                            return Ok(value);
                        }
                        Err(source) => NetworkingError::RequestFailed { source },
                    }
                }
                Ok(response) => NetworkingError::UnsuccessfulStatus {
                    url: url.clone(),
                    status: response.status(),
                },
                Err(source) => NetworkingError::RequestFailed { source },
            };

            if retry_count >= self.policy.max_retries {
                return Err(failure);
            }
            retry_count += 1;

            warn!(
                "{}; retrying in {:?} (retry {}/{})",
                failure, self.policy.backoff, retry_count, self.policy.max_retries
            );

            tokio::time::sleep(self.policy.backoff).await;
        }
    }

    /// Make a GET request with retries
    pub async fn get(&self, url: &str) -> Result<Response, NetworkingError> {
        let request = self.client.get(url).build()?;
        self.execute(request).await
    }

    /// GET a text body, retrying failed body reads as well as failed requests
    pub async fn get_text(&self, url: &str) -> Result<String, NetworkingError> {
        let request = self.client.get(url).build()?;
        self.execute_with(request, Response::text).await
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    include!("retry.test.rs");
}
