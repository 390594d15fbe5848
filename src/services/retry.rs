use rand::Rng;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Exponential backoff settings for outbound calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Number of attempts actually made; zero is treated as one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Deterministic part of the wait after failed attempt `attempt` (0-indexed)
    pub fn backoff_floor(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Full wait after failed attempt `attempt`: floor plus random jitter
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
        };
        self.backoff_floor(attempt) + jitter
    }

    /// Minimum total time spent sleeping when every attempt fails
    pub fn total_backoff_floor(&self) -> Duration {
        (0..self.attempts() - 1)
            .map(|attempt| self.backoff_floor(attempt))
            .sum()
    }
}

/// A single failed HTTP attempt
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    Status { status: StatusCode, body: String },

    #[error("Request body cannot be replayed")]
    NotReplayable,
}

impl FetchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::RequestError(e) => e.status(),
            FetchError::NotReplayable => None,
        }
    }
}

/// All attempts failed; carries the last underlying failure
#[derive(Debug)]
pub struct RetryError<E> {
    pub attempts: u32,
    pub last: E,
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to fetch after {} attempts. Last error: {}",
            self.attempts, self.last
        )
    }
}

impl<E> std::error::Error for RetryError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last)
    }
}

/// Run `operation` until it succeeds or the policy's attempts run out
///
/// The closure receives the 0-indexed attempt number. After a failed attempt
/// `i` (other than the last) the task sleeps for `policy.delay_after(i)`.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!("Succeeded on attempt {} of {}", attempt + 1, attempts);
                }
                return Ok(value);
            }
            Err(e) if attempt + 1 >= attempts => {
                tracing::error!("Giving up after {} attempts: {}", attempts, e);
                return Err(RetryError { attempts, last: e });
            }
            Err(e) => {
                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    "Attempt {} of {} failed ({}), retrying in {:?}",
                    attempt + 1,
                    attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Send an HTTP request with retries on transport errors and non-2xx statuses
pub async fn fetch_with_backoff(
    policy: &RetryPolicy,
    request: RequestBuilder,
) -> Result<Response, RetryError<FetchError>> {
    retry_with_backoff(policy, |_| send_once(request.try_clone())).await
}

async fn send_once(request: Option<RequestBuilder>) -> Result<Response, FetchError> {
    let request = request.ok_or(FetchError::NotReplayable)?;
    let response = request.send().await?;

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(FetchError::Status { status, body })
}
