//! NetWatch Domain - the authoritative rules of the hacking simulation.
//!
//! Pure and synchronous: every operation validates its input and returns a
//! new value or a [`DomainError`]. Time and randomness are passed in by the
//! caller; nothing here performs I/O.

pub mod aggregates;
pub mod error;
pub mod ids;
pub mod ip_allocation;
pub mod value_objects;

pub use aggregates::{
    Computer, ComputerRecord, Defense, DefenseRecord, DefenseType, HackOperation,
    HackOperationRecord, HackResultData, HackStatus, HackType, Player, PlayerRecord,
    ProgressionUnlock, ProgressionUnlockRecord, ResourceKind, ToolLoadout, UnlockType, User,
    UserRecord,
};

pub use error::DomainError;

pub use ids::{ComputerId, DefenseId, HackOperationId, PlayerId, ProgressionUnlockId, UserId};

pub use ip_allocation::{allocate_ip_address, candidate_addresses, MAX_ALLOCATION_ATTEMPTS};

pub use value_objects::{
    ComputerName, DisplayName, Email, Energy, IpAddress, Money, PasswordHash, UnlockKey, Username,
};
