use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::pipeline::{PipelineConfig, PipelineError};
use crate::storage::ObjectStore;

/// Polls an object store until at least one key matches a prefix.
pub struct FileSensor {
    prefix: String,
    timeout: Duration,
    poke_interval: Duration
}

impl FileSensor {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            prefix: config.file_pattern.clone(),
            timeout: config.sensor_timeout,
            poke_interval: config.poke_interval
        }
    }

    /// Returns the matching keys, or `SensorTimeout` once the timeout elapses
    /// without a match.
    pub async fn wait<S: ObjectStore>(&self, store: &S) -> Result<Vec<String>, PipelineError> {
        let started = Instant::now();

        loop {
            let keys = store.list(&self.prefix)?;

            if !keys.is_empty() {
                info!("Found {} object(s) matching [{}]", keys.len(), self.prefix);
                return Ok(keys);
            }

            let waited = started.elapsed();

            if waited >= self.timeout {
                return Err(PipelineError::SensorTimeout {
                    prefix: self.prefix.clone(),
                    waited
                });
            }

            debug!("No objects matching [{}] yet, poking again in {:?}", self.prefix, self.poke_interval);
            sleep(self.poke_interval.min(self.timeout - waited)).await;
        }
    }
}
