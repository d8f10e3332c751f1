//! Money value object
//!
//! In-game currency. Stored as an unsigned 64-bit integer so amounts are
//! exact and can never be negative; no floating point is involved.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A non-negative amount of in-game currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the sum does not fit in 64 bits.
    pub fn add(&self, other: Money) -> Result<Money, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::overflow("Money amount exceeds the representable range"))
    }

    /// # Errors
    ///
    /// Returns `DomainError::InsufficientFunds` if `other` exceeds this amount.
    pub fn subtract(&self, other: Money) -> Result<Money, DomainError> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(DomainError::InsufficientFunds {
                required: other.0,
                available: self.0,
            })
    }

    /// Takes a whole-number percentage of this amount, rounding down.
    pub fn percentage(&self, percent: u8) -> Money {
        let scaled = u128::from(self.0) * u128::from(percent.min(100)) / 100;
        // percent <= 100, so the result never exceeds self.0
        Money(scaled as u64)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_greater_than(&self, other: &Money) -> bool {
        self.0 > other.0
    }

    pub fn is_greater_than_or_equal(&self, other: &Money) -> bool {
        self.0 >= other.0
    }

    pub fn is_equal(&self, other: &Money) -> bool {
        self.0 == other.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_then_add_round_trips() {
        let pairs = [(0, 0), (10, 3), (500, 500), (u64::MAX, 1), (u64::MAX, u64::MAX)];
        for (a, b) in pairs {
            let a = Money::new(a);
            let b = Money::new(b);
            let back = a.subtract(b).unwrap().add(b).unwrap();
            assert!(back.is_equal(&a));
        }
    }

    #[test]
    fn subtract_more_than_available_fails() {
        let err = Money::new(100).subtract(Money::new(101)).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientFunds {
                required: 101,
                available: 100
            }
        );
    }

    #[test]
    fn add_reports_overflow() {
        let result = Money::new(u64::MAX).add(Money::new(1));
        assert!(matches!(result, Err(DomainError::Overflow(_))));
    }

    #[test]
    fn comparisons() {
        let small = Money::new(5);
        let big = Money::new(9);
        assert!(big.is_greater_than(&small));
        assert!(!small.is_greater_than(&small));
        assert!(small.is_greater_than_or_equal(&small));
        assert!(small < big);
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn percentage_rounds_down() {
        assert_eq!(Money::new(1005).percentage(10), Money::new(100));
        assert_eq!(Money::new(u64::MAX).percentage(100), Money::new(u64::MAX));
        assert_eq!(Money::new(7).percentage(10), Money::zero());
    }
}
