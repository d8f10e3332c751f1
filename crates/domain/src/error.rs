//! Domain error types
//!
//! A single error enum for every aggregate and value object in the core.
//! Adapters wrap it in their own error types instead of stringifying it.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Spending more money than is available
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: u64, available: u64 },

    /// Consuming more energy than is available
    #[error("Insufficient energy: requested {requested}, available {available}")]
    InsufficientEnergy { requested: u32, available: u32 },

    /// Consuming more skill points than are available
    #[error("Insufficient skill points: requested {requested}, available {available}")]
    InsufficientSkillPoints { requested: u32, available: u32 },

    /// Defense cannot be upgraded any further
    #[error("Defense already at maximum level {max}")]
    DefenseAtMaxLevel { max: u8 },

    /// Hack operation lifecycle move not in the transition table
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// No free address found within the attempt bound
    #[error("Address space exhausted after {attempts} attempts")]
    AddressSpaceExhausted { attempts: u32 },

    /// Arithmetic would exceed the representable range
    #[error("Overflow: {0}")]
    Overflow(String),
}

impl DomainError {
    /// Creates a validation error for malformed input.
    ///
    /// Use this when a constructor or mutating operation receives a value
    /// outside its allowed range:
    /// - Names that are empty or too long
    /// - Levels outside their bounds
    /// - Malformed email addresses
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Computer name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an overflow error
    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    /// Create an invalid transition error from any displayable states
    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Returns true for business-rule refusals (as opposed to malformed input).
    pub fn is_invariant_refusal(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. }
                | Self::InsufficientEnergy { .. }
                | Self::InsufficientSkillPoints { .. }
                | Self::DefenseAtMaxLevel { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: name cannot be empty");
    }

    #[test]
    fn test_insufficient_funds_message() {
        let err = DomainError::InsufficientFunds {
            required: 500,
            available: 120,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: required 500, available 120"
        );
        assert!(err.is_invariant_refusal());
    }

    #[test]
    fn test_invalid_transition_error() {
        let err = DomainError::invalid_transition("succeeded", "pending");
        assert_eq!(
            err.to_string(),
            "Invalid transition from succeeded to pending"
        );
        assert!(!err.is_invariant_refusal());
    }

    #[test]
    fn test_address_space_exhausted_error() {
        let err = DomainError::AddressSpaceExhausted { attempts: 100 };
        assert_eq!(
            err.to_string(),
            "Address space exhausted after 100 attempts"
        );
    }
}
