use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

use crate::pipeline::PipelineError;

const RETRIES: u32 = 1;
const RETRY_DELAY: Duration = Duration::from_secs(5 * 60);

/// Fixed delay retry applied around each pipeline stage.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first failure.
    pub retries: u32,
    pub delay: Duration
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: RETRIES,
            delay: RETRY_DELAY
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self {
            retries,
            delay
        }
    }

    /// Runs `operation` until it succeeds or the retries are exhausted, returning
    /// the last error in the latter case.
    pub async fn run<T, F, Fut>(&self, stage: &str, mut operation: F) -> Result<T, PipelineError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, PipelineError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(value) => return Ok(value),
                Err(failure) if attempt <= self.retries => {
                    warn!("Stage [{stage}] attempt {attempt} failed, retrying in {:?}: {failure}", self.delay);
                    sleep(self.delay).await;
                }
                Err(failure) => {
                    error!("Stage [{stage}] failed after {attempt} attempt(s): {failure}");
                    return Err(failure);
                }
            }
        }
    }
}
