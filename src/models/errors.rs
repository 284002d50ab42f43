use std::io;

use crate::models::{Cardholder, Transaction};
use crate::types::TransactionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Schema violation at row [{row}]: {reason}")]
    SchemaViolation {
        row: String,
        reason: String
    },
    #[error("Malformed timestamp '{value}' for transaction [{transaction_id}]")]
    MalformedTimestamp {
        transaction_id: TransactionId,
        value: String
    },
    #[error("Duplicate {kind} key [{key}]")]
    DuplicateKey {
        kind: &'static str,
        key: String
    },
    #[error("Reward points overflow for transaction [{transaction_id}]")]
    RewardOverflow {
        transaction_id: TransactionId
    },
    #[error("Record I/O error: {0}")]
    Io(#[from] io::Error)
}

impl EnrichmentError {
    pub fn schema_violation(row: impl ToString, reason: impl ToString) -> Self {
        Self::SchemaViolation {
            row: row.to_string(),
            reason: reason.to_string()
        }
    }

    pub fn malformed_timestamp(tx: &Transaction) -> Self {
        Self::MalformedTimestamp {
            transaction_id: tx.transaction_id.clone(),
            value: tx.transaction_timestamp.clone()
        }
    }

    pub fn duplicate_transaction(tx: &Transaction) -> Self {
        Self::DuplicateKey {
            kind: "transaction_id",
            key: tx.transaction_id.clone()
        }
    }

    pub fn duplicate_cardholder(cardholder: &Cardholder) -> Self {
        Self::DuplicateKey {
            kind: "cardholder_id",
            key: cardholder.cardholder_id.clone()
        }
    }

    pub fn reward_overflow(tx: &Transaction) -> Self {
        Self::RewardOverflow {
            transaction_id: tx.transaction_id.clone()
        }
    }
}
