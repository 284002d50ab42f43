use std::sync::Arc;

use tracing::info;

use crate::pipeline::{new_batch_id, Archiver, BatchJob, BatchSubmitter, FileSensor, PipelineConfig, PipelineError};
use crate::storage::ObjectStore;

/// Summary of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub batch_id: String,
    pub inputs: Vec<String>,
    pub output_key: String,
    pub archived: Vec<String>,
    pub enriched: usize,
    pub rejected: usize
}

/// Three stage pipeline: wait for input files, run the enrichment batch, then
/// archive the inputs. A stage only starts once the previous one succeeded.
pub struct Pipeline<S: ObjectStore, B: BatchSubmitter> {
    store: Arc<S>,
    submitter: B,
    config: PipelineConfig
}

impl<S: ObjectStore, B: BatchSubmitter> Pipeline<S, B> {
    pub fn new(store: Arc<S>, submitter: B, config: PipelineConfig) -> Self {
        Self {
            store,
            submitter,
            config
        }
    }

    pub async fn run(&self) -> Result<PipelineRun, PipelineError> {
        let batch_id = new_batch_id();
        let retry = self.config.retry;
        let store = self.store.as_ref();

        info!("Pipeline run for batch [{batch_id}] started");

        let sensor = &FileSensor::new(&self.config);
        let inputs = retry.run("check_file_arrival", move || sensor.wait(store)).await?;

        let job = &BatchJob {
            batch_id: batch_id.clone(),
            inputs: inputs.clone(),
            cardholders_key: self.config.cardholders_key.clone(),
            output_key: self.config.output_key(&batch_id),
            context: self.config.context.clone()
        };
        let submitter = &self.submitter;
        let outcome = retry.run("run_enrichment_job", move || submitter.submit(job)).await?;

        let archiver = &Archiver::new(&self.config);
        let processed = inputs.as_slice();
        let archived = retry.run("move_files_to_archive", move || async move {
            archiver.archive(store, processed)
        }).await?;

        info!(
            "Pipeline run for batch [{batch_id}] finished: {} enriched, {} rejected, {} archived",
            outcome.enriched,
            outcome.rejected,
            archived.len()
        );

        Ok(PipelineRun {
            batch_id,
            inputs,
            output_key: outcome.output_key,
            archived,
            enriched: outcome.enriched,
            rejected: outcome.rejected
        })
    }
}
