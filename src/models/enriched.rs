use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Cardholder, FraudRiskLevel, Transaction, TransactionCategory};
use crate::types::{CardholderId, RewardPoints, TransactionId};

/// A transaction joined with its cardholder and annotated with derived risk and
/// reward columns.
///
/// Field order is the output column order. Cardholder columns, including
/// `updated_reward_points`, are `None` exactly when the cardholder was not found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTransaction {
    pub cardholder_id: CardholderId,
    pub transaction_id: TransactionId,
    pub merchant_id: String,
    pub merchant_name: String,
    pub merchant_category: String,
    pub transaction_amount: Decimal,
    pub transaction_currency: String,
    pub transaction_timestamp: DateTime<Utc>,
    pub transaction_status: String,
    pub fraud_flag: bool,
    pub device_type: String,
    pub merchant_location: String,
    pub transaction_category: TransactionCategory,
    pub high_risk: bool,
    pub customer_name: Option<String>,
    pub reward_points: Option<RewardPoints>,
    pub risk_score: Option<Decimal>,
    pub updated_reward_points: Option<RewardPoints>,
    pub fraud_risk_level: FraudRiskLevel
}

impl EnrichedTransaction {
    /// Builds the output row from an already normalized timestamp and computed
    /// reward balance. A missing cardholder contributes a zero risk score.
    pub fn new(
        transaction: &Transaction,
        timestamp: DateTime<Utc>,
        cardholder: Option<&Cardholder>,
        updated_reward_points: Option<RewardPoints>
    ) -> Self {
        let transaction_category = transaction.category();
        let high_risk = transaction.is_high_risk();
        let risk_score = cardholder.map(|cardholder| cardholder.risk_score);
        let fraud_risk_level = FraudRiskLevel::classify(
            high_risk,
            risk_score.unwrap_or(Decimal::ZERO),
            transaction.fraud_flag
        );

        Self {
            cardholder_id: transaction.cardholder_id.clone(),
            transaction_id: transaction.transaction_id.clone(),
            merchant_id: transaction.merchant_id.clone(),
            merchant_name: transaction.merchant_name.clone(),
            merchant_category: transaction.merchant_category.clone(),
            transaction_amount: transaction.transaction_amount,
            transaction_currency: transaction.transaction_currency.clone(),
            transaction_timestamp: timestamp,
            transaction_status: transaction.transaction_status.clone(),
            fraud_flag: transaction.fraud_flag,
            device_type: transaction.device_type.clone(),
            merchant_location: transaction.merchant_location.clone(),
            transaction_category,
            high_risk,
            customer_name: cardholder.map(|cardholder| cardholder.customer_name.clone()),
            reward_points: cardholder.map(|cardholder| cardholder.reward_points),
            risk_score,
            updated_reward_points,
            fraud_risk_level
        }
    }
}
