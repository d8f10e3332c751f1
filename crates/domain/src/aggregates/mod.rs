//! Aggregate roots - domain objects that own their invariants
//!
//! Each aggregate:
//! - Has a unique, kind-tagged identity
//! - Exposes behavior through methods, not public fields
//! - Returns a new value from every operation (copy-on-write)
//! - Round-trips through a flat `*Record` snapshot for persistence
//!
//! # Rustic DDD Principles
//!
//! | Pattern | Rustic Equivalent |
//! |---------|-------------------|
//! | Private fields + getters | Newtypes valid by construction |
//! | Immutable entities | `&self -> Result<Self, DomainError>` |
//! | Nominal ids | One newtype per entity kind |
//! | Reconstruction from storage | `TryFrom<Record>` re-validating invariants |

pub mod computer;
pub mod defense;
pub mod hack_operation;
pub mod player;
pub mod progression_unlock;
pub mod user;

pub use computer::{Computer, ComputerRecord, ResourceKind};
pub use defense::{Defense, DefenseRecord, DefenseType};
pub use hack_operation::{
    HackOperation, HackOperationRecord, HackResultData, HackStatus, HackType, ToolLoadout,
};
pub use player::{Player, PlayerRecord};
pub use progression_unlock::{ProgressionUnlock, ProgressionUnlockRecord, UnlockType};
pub use user::{User, UserRecord};
