use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use crate::models::{EnrichmentError, TransactionCategory};
use crate::types::{CardholderId, TransactionId};

const HIGH_RISK_AMOUNT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Represents a single raw transaction record as ingested.
///
/// The timestamp is kept as the original string; normalization happens during
/// enrichment so that a malformed value can be reported against its row.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    /// Foreign key into the cardholder reference set.
    pub cardholder_id: CardholderId,
    pub merchant_id: String,
    pub merchant_name: String,
    pub merchant_category: String,
    /// Parsed from its literal digits, never through a float.
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    pub transaction_amount: Decimal,
    pub transaction_currency: String,
    pub transaction_timestamp: String,
    /// SUCCESS, PENDING, FAILED or any other upstream status, passed through untouched.
    pub transaction_status: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub fraud_flag: bool,
    pub device_type: String,
    pub merchant_location: String
}

impl Transaction {
    /// Checks the invariants serde cannot express. `row` is the 1-based input
    /// position, used to identify rows whose id is blank.
    pub fn validate(&self, row: usize) -> Result<(), EnrichmentError> {
        if self.transaction_id.trim().is_empty() {
            return Err(EnrichmentError::schema_violation(row, "transaction_id is empty"));
        }

        if self.cardholder_id.trim().is_empty() {
            return Err(EnrichmentError::schema_violation(&self.transaction_id, "cardholder_id is empty"));
        }

        if self.transaction_amount < Decimal::ZERO {
            return Err(EnrichmentError::schema_violation(&self.transaction_id, "transaction_amount is negative"));
        }

        Ok(())
    }

    pub fn category(&self) -> TransactionCategory {
        TransactionCategory::from_amount(self.transaction_amount)
    }

    /// A transaction is high risk when it was flagged upstream, exceeds the
    /// review amount, or falls in the `High` spend band. Any one clause is enough.
    pub fn is_high_risk(&self) -> bool {
        self.fraud_flag
            || self.transaction_amount > HIGH_RISK_AMOUNT
            || self.category() == TransactionCategory::High
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String)
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::custom(format!("invalid fraud_flag '{other}'")))
        }
    }
}
