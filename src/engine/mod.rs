mod codec;
mod context;
mod enrichment;

pub use codec::{read_cardholders, read_transactions, write_enriched, RecordFormat};
pub use context::{EnrichmentContext, TimestampPolicy};
pub use enrichment::EnrichmentEngine;
