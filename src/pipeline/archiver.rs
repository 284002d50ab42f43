use std::collections::HashSet;

use tracing::{debug, info};

use crate::pipeline::{PipelineConfig, PipelineError};
use crate::storage::ObjectStore;

/// Moves processed inputs from the source prefix to the archive prefix.
pub struct Archiver {
    source_prefix: String,
    archive_prefix: String
}

impl Archiver {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            source_prefix: config.source_prefix.clone(),
            archive_prefix: config.archive_prefix.clone()
        }
    }

    /// Destination keeps the key's path relative to the source prefix.
    pub fn archive_key(&self, key: &str) -> String {
        let relative = key.strip_prefix(&self.source_prefix).unwrap_or(key);
        format!("{}{relative}", self.archive_prefix)
    }

    /// Archives every processed key still present under the source prefix and
    /// returns the new keys. Keys already moved by an earlier attempt are skipped.
    pub fn archive<S: ObjectStore>(&self, store: &S, processed: &[String]) -> Result<Vec<String>, PipelineError> {
        let pending: HashSet<String> = store.list(&self.source_prefix)?.into_iter().collect();
        let mut archived = Vec::with_capacity(processed.len());

        for key in processed {
            if !pending.contains(key) {
                debug!("Object [{key}] is no longer under [{}], skipping", self.source_prefix);
                continue;
            }

            let destination = self.archive_key(key);
            store.move_object(key, &destination)?;
            archived.push(destination);
        }

        info!("Archived {} object(s) to [{}]", archived.len(), self.archive_prefix);

        Ok(archived)
    }
}
