//! Amount type
//!
//! Domain primitive for transfer amounts in minor currency units.
//! Amounts are validated at construction time, so a zero or negative
//! transfer amount cannot reach the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount represents a validated, strictly positive number of minor units.
///
/// # Invariants
/// - Value is always positive (> 0)
/// - Negating it never overflows, so both legs of a transfer are representable
///
/// # Example
/// ```
/// use simple_bank::domain::Amount;
///
/// let amount = Amount::new(250).unwrap();
/// assert_eq!(amount.debit(), -250);
/// assert_eq!(amount.credit(), 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(i64);

/// Errors that can occur when creating an Amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount must be positive (got {0})")]
    NotPositive(i64),

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `AmountError::NotPositive` if value <= 0
    pub fn new(value: i64) -> Result<Self, AmountError> {
        if value <= 0 {
            return Err(AmountError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Signed delta for the account the money leaves.
    pub fn debit(&self) -> i64 {
        -self.0
    }

    /// Signed delta for the account the money arrives at.
    pub fn credit(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|e| AmountError::ParseError(e.to_string()))?;
        Amount::new(value)
    }
}

impl TryFrom<i64> for Amount {
    type Error = AmountError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_positive() {
        let amount = Amount::new(100);
        assert!(amount.is_ok());
        assert_eq!(amount.unwrap().value(), 100);
    }

    #[test]
    fn test_amount_zero_rejected() {
        assert_eq!(Amount::new(0), Err(AmountError::NotPositive(0)));
    }

    #[test]
    fn test_amount_negative_rejected() {
        assert_eq!(Amount::new(-10), Err(AmountError::NotPositive(-10)));
        assert!(Amount::new(i64::MIN).is_err());
    }

    #[test]
    fn test_amount_legs_are_opposite() {
        let amount = Amount::new(i64::MAX).unwrap();
        assert_eq!(amount.debit(), -i64::MAX);
        assert_eq!(amount.debit() + amount.credit(), 0);
    }

    #[test]
    fn test_amount_from_str() {
        let amount: Amount = " 42 ".parse().unwrap();
        assert_eq!(amount.value(), 42);

        assert!(matches!("4.2".parse::<Amount>(), Err(AmountError::ParseError(_))));
        assert!(matches!("-1".parse::<Amount>(), Err(AmountError::NotPositive(-1))));
    }

    #[test]
    fn test_amount_serde_validates() {
        let amount: Amount = serde_json::from_str("10").unwrap();
        assert_eq!(amount.value(), 10);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "10");

        assert!(serde_json::from_str::<Amount>("0").is_err());
    }
}
