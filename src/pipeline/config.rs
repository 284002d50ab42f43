use std::time::Duration;

use crate::engine::EnrichmentContext;
use crate::pipeline::RetryPolicy;

const FILE_PATTERN: &str = "transactions/transactions_";
const SOURCE_PREFIX: &str = "transactions/";
const ARCHIVE_PREFIX: &str = "archive/";
const CARDHOLDERS_KEY: &str = "cardholders/cardholders.csv";
const OUTPUT_PREFIX: &str = "enriched/";
const SENSOR_TIMEOUT: Duration = Duration::from_secs(10 * 60);
const POKE_INTERVAL: Duration = Duration::from_secs(30);

/// Object layout, polling bounds and retry policy for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Key prefix the sensor waits for, new input files must match it.
    pub file_pattern: String,
    /// Processed inputs are archived relative to this prefix.
    pub source_prefix: String,
    pub archive_prefix: String,
    pub cardholders_key: String,
    pub output_prefix: String,
    pub sensor_timeout: Duration,
    pub poke_interval: Duration,
    pub retry: RetryPolicy,
    pub context: EnrichmentContext
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            file_pattern: FILE_PATTERN.to_string(),
            source_prefix: SOURCE_PREFIX.to_string(),
            archive_prefix: ARCHIVE_PREFIX.to_string(),
            cardholders_key: CARDHOLDERS_KEY.to_string(),
            output_prefix: OUTPUT_PREFIX.to_string(),
            sensor_timeout: SENSOR_TIMEOUT,
            poke_interval: POKE_INTERVAL,
            retry: RetryPolicy::default(),
            context: EnrichmentContext::default()
        }
    }
}

impl PipelineConfig {
    pub fn with_sensor_timeout(mut self, sensor_timeout: Duration) -> Self {
        self.sensor_timeout = sensor_timeout;
        self
    }

    pub fn with_poke_interval(mut self, poke_interval: Duration) -> Self {
        self.poke_interval = poke_interval;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_context(mut self, context: EnrichmentContext) -> Self {
        self.context = context;
        self
    }

    /// Key the enriched output of `batch_id` is written to.
    pub fn output_key(&self, batch_id: &str) -> String {
        format!("{}{batch_id}/enriched_transactions.csv", self.output_prefix)
    }
}
