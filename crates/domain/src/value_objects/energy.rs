//! Energy value object - the action resource pool

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Bounded action energy.
///
/// # Invariants
///
/// - `max > 0`
/// - `current <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EnergyParts", into = "EnergyParts")]
pub struct Energy {
    current: u32,
    max: u32,
}

#[derive(Serialize, Deserialize)]
struct EnergyParts {
    current: u32,
    max: u32,
}

impl Energy {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `max` is zero or `current > max`.
    pub fn new(current: u32, max: u32) -> Result<Self, DomainError> {
        if max == 0 {
            return Err(DomainError::validation("Max energy must be positive"));
        }
        if current > max {
            return Err(DomainError::validation("Energy cannot exceed maximum"));
        }
        Ok(Self { current, max })
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `max` is zero.
    pub fn full(max: u32) -> Result<Self, DomainError> {
        Self::new(max, max)
    }

    /// Full pool for a ceiling known to be positive at compile time.
    pub(crate) const fn full_unchecked(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// True when `amount` is positive and fully covered by the current pool.
    pub fn can_consume(&self, amount: u32) -> bool {
        amount > 0 && amount <= self.current
    }

    /// # Errors
    ///
    /// Returns `DomainError::InsufficientEnergy` if `amount > current`.
    pub fn consume(&self, amount: u32) -> Result<Self, DomainError> {
        if amount > self.current {
            return Err(DomainError::InsufficientEnergy {
                requested: amount,
                available: self.current,
            });
        }
        Ok(Self {
            current: self.current - amount,
            max: self.max,
        })
    }

    /// Refills the pool, clamping at `max`.
    pub fn regenerate(&self, amount: u32) -> Self {
        Self {
            current: self.current.saturating_add(amount).min(self.max),
            max: self.max,
        }
    }

    /// Moves the ceiling to `new_max`, lowering `current` if it no longer fits.
    ///
    /// `current` is never raised by this call.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `new_max` is zero.
    pub fn with_max_capacity(&self, new_max: u32) -> Result<Self, DomainError> {
        if new_max == 0 {
            return Err(DomainError::validation("Max energy must be positive"));
        }
        Ok(Self {
            current: self.current.min(new_max),
            max: new_max,
        })
    }
}

impl TryFrom<EnergyParts> for Energy {
    type Error = DomainError;

    fn try_from(parts: EnergyParts) -> Result<Self, Self::Error> {
        Self::new(parts.current, parts.max)
    }
}

impl From<Energy> for EnergyParts {
    fn from(energy: Energy) -> Self {
        Self {
            current: energy.current,
            max: energy.max,
        }
    }
}
