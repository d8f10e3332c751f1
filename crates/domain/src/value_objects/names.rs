//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Within their character-count limits (counted in `char`s)
//! - Not blank where a minimum applies
//!
//! Values are stored exactly as given; no trimming happens here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

const USERNAME_MIN_LENGTH: usize = 3;
const USERNAME_MAX_LENGTH: usize = 20;

/// Display names, computer names and unlock keys share this limit
const MAX_NAME_LENGTH: usize = 50;

static EMAIL_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

fn check_length(
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::validation(format!(
            "{} must be {}-{} characters",
            label, min, max
        )));
    }
    Ok(())
}

macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }
    };
}

// ============================================================================
// Username
// ============================================================================

/// A validated account username (3-20 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the username is shorter than 3
    /// or longer than 20 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        check_length("Username", &name, USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH)?;
        Ok(Self(name))
    }
}

string_newtype_impls!(Username);

// ============================================================================
// Email
// ============================================================================

/// A syntactically valid email address (`local@domain.tld`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the address has whitespace, no
    /// `@`, or no dot in the domain part.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let email = email.into();
        let valid = EMAIL_PATTERN
            .as_ref()
            .map(|re| re.is_match(&email))
            .unwrap_or(false);
        if !valid {
            return Err(DomainError::validation("Invalid email format"));
        }
        Ok(Self(email))
    }
}

string_newtype_impls!(Email);

// ============================================================================
// DisplayName
// ============================================================================

/// A validated player display name (1-50 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty or exceeds 50 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        check_length("Display name", &name, 1, MAX_NAME_LENGTH)?;
        Ok(Self(name))
    }
}

string_newtype_impls!(DisplayName);

// ============================================================================
// ComputerName
// ============================================================================

/// A validated computer name (1-50 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComputerName(String);

impl ComputerName {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the name is empty or exceeds 50 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        check_length("Computer name", &name, 1, MAX_NAME_LENGTH)?;
        Ok(Self(name))
    }
}

string_newtype_impls!(ComputerName);

// ============================================================================
// UnlockKey
// ============================================================================

/// Key naming a progression grant, e.g. `tool_sqlmap` (1-50 chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnlockKey(String);

impl UnlockKey {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the key is empty or exceeds 50 characters.
    pub fn new(key: impl Into<String>) -> Result<Self, DomainError> {
        let key = key.into();
        if key.is_empty() {
            return Err(DomainError::validation("Unlock key cannot be empty"));
        }
        check_length("Unlock key", &key, 1, MAX_NAME_LENGTH)?;
        Ok(Self(key))
    }
}

string_newtype_impls!(UnlockKey);

// ============================================================================
// PasswordHash
// ============================================================================

/// An opaque password hash produced by the identity subsystem.
///
/// The core stores and returns it but never inspects it. `Debug` output is
/// redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
