//! Positive monetary value in the smallest currency unit.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::error::DomainError;

/// A strictly positive amount, in the smallest unit of the currency (cents).
///
/// Stored as an integer to avoid floating-point precision issues. On the wire
/// it is a bare JSON integer; non-positive values are rejected while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i64", into = "i64")]
#[schema(value_type = i64, example = 10000)]
pub struct Amount(i64);

impl Amount {
    /// Creates a new Amount, rejecting zero and negative values.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::NonPositiveValue(value));
        }
        Ok(Self(value))
    }

    /// Returns the amount in smallest currency unit.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns what is left after deducting `percent` percent, floored.
    ///
    /// Integer arithmetic keeps this exact: `floor(value * (100 - percent) / 100)`.
    /// The product is widened to `i128`; for `0 <= percent <= 100` the result
    /// never exceeds `value`, so narrowing back is lossless.
    pub fn net_of_percent(&self, percent: i64) -> i64 {
        (i128::from(self.0) * i128::from(100 - percent) / 100) as i64
    }
}

impl TryFrom<i64> for Amount {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_creation() {
        let amount = Amount::new(1000).unwrap();
        assert_eq!(amount.value(), 1000);
    }

    #[test]
    fn test_zero_and_negative_fail() {
        assert!(matches!(
            Amount::new(0),
            Err(DomainError::NonPositiveValue(0))
        ));
        assert!(matches!(
            Amount::new(-100),
            Err(DomainError::NonPositiveValue(-100))
        ));
    }

    #[test]
    fn test_net_of_percent_floors() {
        let amount = Amount::new(101).unwrap();
        assert_eq!(amount.net_of_percent(5), 95);
        assert_eq!(amount.net_of_percent(1), 99);
        assert_eq!(Amount::new(1).unwrap().net_of_percent(2), 0);
    }

    #[test]
    fn test_net_of_percent_near_max_does_not_overflow() {
        let amount = Amount::new(i64::MAX).unwrap();
        assert_eq!(amount.net_of_percent(0), i64::MAX);
        assert_eq!(amount.net_of_percent(5), 8_762_203_435_012_037_016);
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        assert!(serde_json::from_str::<Amount>("0").is_err());
        assert!(serde_json::from_str::<Amount>("-5").is_err());
        assert_eq!(serde_json::from_str::<Amount>("42").unwrap().value(), 42);
        assert_eq!(serde_json::to_string(&Amount::new(7).unwrap()).unwrap(), "7");
    }
}
