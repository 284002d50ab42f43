use super::{Cardholder, EnrichedTransaction, EnrichmentError, FraudRiskLevel, Transaction, TransactionCategory};

use std::str::FromStr;

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;

fn create_transaction(transaction_id: &str, amount: &str, fraud_flag: bool) -> Result<Transaction> {
    Ok(Transaction {
        transaction_id: transaction_id.to_string(),
        cardholder_id: "CH001".to_string(),
        merchant_id: "M001".to_string(),
        merchant_name: "Walmart".to_string(),
        merchant_category: "Groceries".to_string(),
        transaction_amount: Decimal::from_str(amount)?,
        transaction_currency: "USD".to_string(),
        transaction_timestamp: "2025-02-04T10:00:00Z".to_string(),
        transaction_status: "SUCCESS".to_string(),
        fraud_flag,
        device_type: "Mobile".to_string(),
        merchant_location: "New York, USA".to_string()
    })
}

fn create_cardholder(reward_points: u64, risk_score: &str) -> Result<Cardholder> {
    Ok(Cardholder {
        cardholder_id: "CH001".to_string(),
        customer_name: "John Doe".to_string(),
        reward_points,
        risk_score: Decimal::from_str(risk_score)?
    })
}

#[test]
fn test_category_boundaries_are_closed_on_the_upper_bound() -> Result<()> {
    let test_cases = vec![
        ("0", TransactionCategory::Low),
        ("100.00", TransactionCategory::Low),
        ("100.01", TransactionCategory::Medium),
        ("500.00", TransactionCategory::Medium),
        ("500.01", TransactionCategory::High),
        ("10000.01", TransactionCategory::High),
    ];

    for (amount, expected_category) in test_cases {
        assert_eq!(TransactionCategory::from_amount(Decimal::from_str(amount)?), expected_category, "amount {amount}");
    }

    Ok(())
}

#[test]
fn test_high_risk_is_set_by_any_single_clause() -> Result<()> {
    assert!(!create_transaction("T1", "120.50", false)?.is_high_risk());
    assert!(create_transaction("T2", "50.00", true)?.is_high_risk());
    assert!(create_transaction("T3", "500.01", false)?.is_high_risk());
    assert!(create_transaction("T4", "9500.75", false)?.is_high_risk());
    assert!(create_transaction("T5", "10000.01", false)?.is_high_risk());

    Ok(())
}

#[test]
fn test_fraud_risk_level_uses_ordered_precedence() -> Result<()> {
    let low_score = Decimal::from_str("0.10")?;
    let threshold = Decimal::from_str("0.3")?;
    let high_score = Decimal::from_str("0.35")?;

    assert_eq!(FraudRiskLevel::classify(true, low_score, false), FraudRiskLevel::Critical);
    assert_eq!(FraudRiskLevel::classify(true, high_score, true), FraudRiskLevel::Critical);
    assert_eq!(FraudRiskLevel::classify(false, high_score, false), FraudRiskLevel::High);
    assert_eq!(FraudRiskLevel::classify(false, low_score, true), FraudRiskLevel::High);
    assert_eq!(FraudRiskLevel::classify(false, threshold, false), FraudRiskLevel::Low);
    assert_eq!(FraudRiskLevel::classify(false, low_score, false), FraudRiskLevel::Low);

    Ok(())
}

#[test]
fn test_reward_points_round_half_away_from_zero() -> Result<()> {
    let test_cases = vec![
        (4500, "120.50", 4512),
        (1200, "9500.75", 2150),
        (8000, "75.20", 8008),
        (0, "125.00", 13),
        (0, "124.99", 12),
        (10, "0", 10),
    ];

    for (balance, amount, expected_balance) in test_cases {
        let cardholder = create_cardholder(balance, "0.1")?;

        assert_eq!(cardholder.updated_reward_points(Decimal::from_str(amount)?), Some(expected_balance), "amount {amount}");
    }

    Ok(())
}

#[test]
fn test_reward_points_overflow_yields_none() -> Result<()> {
    let cardholder = create_cardholder(u64::MAX, "0.1")?;

    assert_eq!(cardholder.updated_reward_points(Decimal::from_str("10")?), None);

    Ok(())
}

#[test]
fn test_validation_rejects_invariant_violations() -> Result<()> {
    let negative = create_transaction("T1", "-1.00", false)?;
    assert!(matches!(negative.validate(1), Err(EnrichmentError::SchemaViolation { ref row, .. }) if row == "T1"));

    let blank_id = create_transaction("  ", "1.00", false)?;
    assert!(matches!(blank_id.validate(7), Err(EnrichmentError::SchemaViolation { ref row, .. }) if row == "7"));

    let mut orphan = create_transaction("T2", "1.00", false)?;
    orphan.cardholder_id = String::new();
    assert!(orphan.validate(1).is_err());

    assert!(create_transaction("T3", "0", false)?.validate(1).is_ok());
    assert!(create_cardholder(0, "1.01")?.validate(1).is_err());
    assert!(create_cardholder(0, "-0.01")?.validate(1).is_err());
    assert!(create_cardholder(0, "1")?.validate(1).is_ok());

    Ok(())
}

#[test]
fn test_enriched_row_without_cardholder_has_null_cardholder_columns() -> Result<()> {
    let transaction = create_transaction("T1", "120.50", false)?;
    let enriched = EnrichedTransaction::new(&transaction, Utc::now(), None, None);

    assert!(enriched.customer_name.is_none());
    assert!(enriched.reward_points.is_none());
    assert!(enriched.risk_score.is_none());
    assert!(enriched.updated_reward_points.is_none());
    assert_eq!(enriched.transaction_category, TransactionCategory::Medium);
    assert_eq!(enriched.fraud_risk_level, FraudRiskLevel::Low);

    Ok(())
}

#[test]
fn test_enriched_row_with_flagged_unmatched_transaction_is_critical() -> Result<()> {
    let transaction = create_transaction("T1", "20.00", true)?;
    let enriched = EnrichedTransaction::new(&transaction, Utc::now(), None, None);

    assert!(enriched.high_risk);
    assert_eq!(enriched.fraud_risk_level, FraudRiskLevel::Critical);

    Ok(())
}
