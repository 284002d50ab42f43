use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::engine::{EnrichmentContext, TimestampPolicy};
use crate::models::{Cardholder, EnrichedTransaction, EnrichmentError, Transaction};
use crate::types::{parse_timestamp, TransactionId};

/// A transaction left out of the output under `TimestampPolicy::IsolateRow`.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub transaction_id: TransactionId,
    pub reason: String
}

/// Result of one batch. Every input transaction is in exactly one of
/// `enriched` or `rejected`.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentReport {
    pub enriched: Vec<EnrichedTransaction>,
    pub rejected: Vec<RejectedRow>,
    /// Number of enriched rows that found no cardholder.
    pub unmatched: usize
}

/// Pure batch transform joining transactions to cardholders and deriving the
/// category, risk and reward columns.
pub struct EnrichmentEngine {
    context: EnrichmentContext
}

impl EnrichmentEngine {
    pub fn new(context: EnrichmentContext) -> Self {
        Self {
            context
        }
    }

    /// Enriches a batch, preserving input order.
    ///
    /// # Errors
    /// Returns `EnrichmentError` if:
    /// - A row breaks a schema invariant (blank ids, negative amount, risk score range).
    /// - A transaction or cardholder id appears twice.
    /// - A timestamp is malformed and the policy is `FailBatch`.
    /// - An updated reward balance overflows.
    pub fn enrich(&self, transactions: &[Transaction], cardholders: &[Cardholder]) -> Result<EnrichmentReport, EnrichmentError> {
        let index = index_cardholders(cardholders)?;
        check_transactions(transactions)?;

        let mut report = EnrichmentReport {
            enriched: Vec::with_capacity(transactions.len()),
            ..EnrichmentReport::default()
        };

        for transaction in transactions {
            let timestamp = match parse_timestamp(&transaction.transaction_timestamp) {
                Ok(timestamp) => timestamp,
                Err(error) => match self.context.timestamp_policy {
                    TimestampPolicy::FailBatch => return Err(EnrichmentError::malformed_timestamp(transaction)),
                    TimestampPolicy::IsolateRow => {
                        warn!("Transaction [{}] isolated: {error}", transaction.transaction_id);
                        report.rejected.push(RejectedRow {
                            transaction_id: transaction.transaction_id.clone(),
                            reason: EnrichmentError::malformed_timestamp(transaction).to_string()
                        });
                        continue;
                    }
                }
            };

            let cardholder = index.get(transaction.cardholder_id.as_str()).copied();

            let updated_reward_points = match cardholder {
                Some(cardholder) => Some(
                    cardholder.updated_reward_points(transaction.transaction_amount)
                        .ok_or_else(|| EnrichmentError::reward_overflow(transaction))?
                ),
                None => {
                    debug!("No cardholder [{}] for transaction [{}]", transaction.cardholder_id, transaction.transaction_id);
                    report.unmatched += 1;
                    None
                }
            };

            report.enriched.push(EnrichedTransaction::new(transaction, timestamp, cardholder, updated_reward_points));
        }

        info!(
            "Enriched {} transactions ({} unmatched, {} rejected)",
            report.enriched.len(),
            report.unmatched,
            report.rejected.len()
        );

        Ok(report)
    }
}

fn index_cardholders(cardholders: &[Cardholder]) -> Result<HashMap<&str, &Cardholder>, EnrichmentError> {
    let mut index = HashMap::with_capacity(cardholders.len());

    for (position, cardholder) in cardholders.iter().enumerate() {
        cardholder.validate(position + 1)?;

        match index.entry(cardholder.cardholder_id.as_str()) {
            Entry::Occupied(_) => return Err(EnrichmentError::duplicate_cardholder(cardholder)),
            Entry::Vacant(slot) => {
                slot.insert(cardholder);
            }
        }
    }

    Ok(index)
}

fn check_transactions(transactions: &[Transaction]) -> Result<(), EnrichmentError> {
    let mut seen = HashSet::with_capacity(transactions.len());

    for (position, transaction) in transactions.iter().enumerate() {
        transaction.validate(position + 1)?;

        if !seen.insert(transaction.transaction_id.as_str()) {
            return Err(EnrichmentError::duplicate_transaction(transaction));
        }
    }

    Ok(())
}
