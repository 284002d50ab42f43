mod archiver;
mod config;
mod errors;
mod retry;
mod runner;
mod sensor;
mod submitter;

pub use archiver::Archiver;
pub use config::PipelineConfig;
pub use errors::PipelineError;
pub use retry::RetryPolicy;
pub use runner::Pipeline;
pub use sensor::FileSensor;
pub use submitter::{new_batch_id, BatchJob, BatchSubmitter, LocalSubmitter};
