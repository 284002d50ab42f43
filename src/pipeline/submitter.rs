use std::future::Future;
use std::sync::Arc;

use tokio::task::spawn_blocking;
use tracing::info;
use uuid::Uuid;

use crate::engine::{read_cardholders, read_transactions, write_enriched, EnrichmentContext, EnrichmentEngine, RecordFormat};
use crate::pipeline::PipelineError;
use crate::storage::ObjectStore;

const BATCH_ID_PREFIX: &str = "credit-card-batch-";

/// Generates a short unique id for one batch submission.
pub fn new_batch_id() -> String {
    let uuid = Uuid::new_v4().to_string();
    format!("{BATCH_ID_PREFIX}{}", &uuid[..8])
}

/// Everything a submitter needs to run the enrichment once.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub batch_id: String,
    /// Transaction object keys, read and enriched as one batch.
    pub inputs: Vec<String>,
    pub cardholders_key: String,
    pub output_key: String,
    pub context: EnrichmentContext
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub output_key: String,
    pub enriched: usize,
    pub rejected: usize,
    pub unmatched: usize
}

/// Launches an enrichment job on some compute backend and waits for completion.
pub trait BatchSubmitter: Send + Sync {
    fn submit(&self, job: &BatchJob) -> impl Future<Output = Result<BatchOutcome, PipelineError>> + Send;
}

/// Runs the job in process on the blocking thread pool.
pub struct LocalSubmitter<S: ObjectStore> {
    store: Arc<S>
}

impl<S: ObjectStore> LocalSubmitter<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store
        }
    }
}

impl<S: ObjectStore> BatchSubmitter for LocalSubmitter<S> {
    async fn submit(&self, job: &BatchJob) -> Result<BatchOutcome, PipelineError> {
        let store = self.store.clone();
        let job = job.clone();

        spawn_blocking(move || run_job(store.as_ref(), &job)).await
            .map_err(|error| PipelineError::JobFailed(error.to_string()))?
    }
}

fn run_job<S: ObjectStore>(store: &S, job: &BatchJob) -> Result<BatchOutcome, PipelineError> {
    info!("Batch [{}] started with {} input(s)", job.batch_id, job.inputs.len());

    let cardholders_format = record_format(&job.cardholders_key)?;
    let cardholders = read_cardholders(store.get(&job.cardholders_key)?.as_slice(), cardholders_format)?;

    let mut transactions = Vec::new();

    for key in &job.inputs {
        let format = record_format(key)?;
        transactions.extend(read_transactions(store.get(key)?.as_slice(), format)?);
    }

    let report = EnrichmentEngine::new(job.context.clone()).enrich(&transactions, &cardholders)?;

    let mut output = Vec::new();
    write_enriched(&mut output, &report.enriched)?;
    store.put(&job.output_key, output)?;

    info!("Batch [{}] wrote {} row(s) to [{}]", job.batch_id, report.enriched.len(), job.output_key);

    Ok(BatchOutcome {
        output_key: job.output_key.clone(),
        enriched: report.enriched.len(),
        rejected: report.rejected.len(),
        unmatched: report.unmatched
    })
}

fn record_format(key: &str) -> Result<RecordFormat, PipelineError> {
    RecordFormat::from_path(key).ok_or_else(|| PipelineError::UnsupportedFormat(key.to_string()))
}
