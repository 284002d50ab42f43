/// How the engine treats a transaction whose timestamp cannot be normalized.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum TimestampPolicy {
    /// Abort the whole batch with `MalformedTimestamp`.
    #[default]
    FailBatch,
    /// Leave the row out of the output and report it in `EnrichmentReport::rejected`.
    IsolateRow
}

/// Configuration scoped to a single enrichment invocation.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentContext {
    pub timestamp_policy: TimestampPolicy
}

impl EnrichmentContext {
    pub fn with_timestamp_policy(mut self, timestamp_policy: TimestampPolicy) -> Self {
        self.timestamp_policy = timestamp_policy;
        self
    }
}
