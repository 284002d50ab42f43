mod cardholder;
mod enriched;
mod errors;
#[cfg(test)]
mod tests;
mod transaction;

use rust_decimal::Decimal;
use serde::Serialize;

pub use cardholder::Cardholder;
pub use enriched::EnrichedTransaction;
pub use errors::EnrichmentError;
pub use transaction::Transaction;

const LOW_CATEGORY_CEILING: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
const MEDIUM_CATEGORY_CEILING: Decimal = Decimal::from_parts(500, 0, 0, false, 0);
const RISK_SCORE_THRESHOLD: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Spend band of a transaction, derived only from its amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum TransactionCategory {
    Low,
    Medium,
    High
}

impl TransactionCategory {
    /// Bands are closed on their upper bound: 100 is `Low` and 500 is `Medium`.
    pub fn from_amount(amount: Decimal) -> Self {
        if amount <= LOW_CATEGORY_CEILING {
            TransactionCategory::Low
        } else if amount <= MEDIUM_CATEGORY_CEILING {
            TransactionCategory::Medium
        } else {
            TransactionCategory::High
        }
    }
}

/// Three tier fraud classification combining transaction and cardholder signals.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum FraudRiskLevel {
    Low,
    High,
    Critical
}

impl FraudRiskLevel {
    /// Resolves the level by ordered precedence, the first matching rule wins:
    /// a high risk transaction is always `Critical`, then a risky cardholder or
    /// a flagged transaction is `High`, anything else is `Low`.
    pub fn classify(high_risk: bool, risk_score: Decimal, fraud_flag: bool) -> Self {
        if high_risk {
            FraudRiskLevel::Critical
        } else if risk_score > RISK_SCORE_THRESHOLD || fraud_flag {
            FraudRiskLevel::High
        } else {
            FraudRiskLevel::Low
        }
    }
}
