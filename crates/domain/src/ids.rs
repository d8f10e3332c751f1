use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wraps an identifier received from storage or the wire.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::InvalidId` if the value is blank.
            pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!(
                        "{} cannot be empty",
                        stringify!($name)
                    )));
                }
                Ok(Self(value))
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Identity
define_id!(UserId);
define_id!(PlayerId);

// Assets
define_id!(ComputerId);
define_id!(DefenseId);

// Operations
define_id!(HackOperationId);

// Progression
define_id!(ProgressionUnlockId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }

    #[test]
    fn parse_rejects_blank() {
        assert!(matches!(
            ComputerId::parse("  "),
            Err(DomainError::InvalidId(_))
        ));
        assert_eq!(ComputerId::parse("c-1").unwrap().as_str(), "c-1");
    }

    #[test]
    fn serde_uses_plain_string() {
        let id = PlayerId::parse("player-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"player-42\"");

        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<PlayerId>("\"\"").is_err());
    }
}
