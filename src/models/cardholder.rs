use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer};

use crate::models::EnrichmentError;
use crate::types::{CardholderId, RewardPoints};

const SPEND_PER_POINT: Decimal = Decimal::TEN;

/// Reference record for the owner of a card.
#[derive(Debug, Clone, Deserialize)]
pub struct Cardholder {
    pub cardholder_id: CardholderId,
    pub customer_name: String,
    /// Current loyalty balance before this batch.
    #[serde(deserialize_with = "deserialize_points")]
    pub reward_points: RewardPoints,
    /// Cardholder level fraud propensity in `[0, 1]`.
    #[serde(deserialize_with = "rust_decimal::serde::arbitrary_precision::deserialize")]
    pub risk_score: Decimal
}

impl Cardholder {
    pub fn validate(&self, row: usize) -> Result<(), EnrichmentError> {
        if self.cardholder_id.trim().is_empty() {
            return Err(EnrichmentError::schema_violation(row, "cardholder_id is empty"));
        }

        if self.risk_score < Decimal::ZERO || self.risk_score > Decimal::ONE {
            return Err(EnrichmentError::schema_violation(&self.cardholder_id, "risk_score is outside [0, 1]"));
        }

        Ok(())
    }

    /// Balance after crediting one point per ten units spent.
    ///
    /// The quotient is rounded half away from zero, so 12.05 earns 12 points and
    /// 7.52 earns 8. Returns `None` if the result does not fit the balance type.
    pub fn updated_reward_points(&self, amount: Decimal) -> Option<RewardPoints> {
        let earned = amount.checked_div(SPEND_PER_POINT)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()?;

        self.reward_points.checked_add(earned)
    }
}

fn deserialize_points<'de, D>(deserializer: D) -> Result<RewardPoints, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Points {
        Number(RewardPoints),
        Text(String)
    }

    match Points::deserialize(deserializer)? {
        Points::Number(value) => Ok(value),
        Points::Text(value) => value.trim().parse()
            .map_err(|_| de::Error::custom(format!("invalid reward_points '{value}'")))
    }
}
