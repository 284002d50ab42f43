use std::time::Duration;

use thiserror::Error;

use crate::models::EnrichmentError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No objects matching prefix [{prefix}] after {waited:?}")]
    SensorTimeout {
        prefix: String,
        waited: Duration
    },
    #[error("Object [{0}] has an unsupported record format")]
    UnsupportedFormat(String),
    #[error("Batch job failed: {0}")]
    JobFailed(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError)
}
