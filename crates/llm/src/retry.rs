use lecturelens_common::{AppError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded retry with a fixed pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Pause before each retry
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Policy for per-chunk summarization: one retry after 1.2s
    pub const fn chunk() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_millis(1200),
        }
    }

    /// Run `op` until it succeeds or attempts are exhausted
    ///
    /// Returns the error of the last attempt.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < max_attempts => {
                    warn!(
                        "{} failed (attempt {}/{}): {}. Retrying in {:?}...",
                        label, attempt, max_attempts, e, self.backoff
                    );
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Errors reported when every attempt failed carry the attempt count
pub fn exhausted(label: &str, attempts: u32, err: AppError) -> AppError {
    let message = format!("{} failed after {} attempts: {}", label, attempts, err.message);
    AppError { message, ..err }
}
