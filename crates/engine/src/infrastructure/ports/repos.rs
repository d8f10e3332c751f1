//! Repository port traits for persistence.
//!
//! `save` is an upsert. Implementations own the uniqueness constraints listed
//! on each trait and report a violation as `RepoError::ConstraintViolation`.

use async_trait::async_trait;
use netwatch_domain::{
    Computer, ComputerId, Defense, DefenseId, Email, HackOperation, HackOperationId, HackStatus,
    IpAddress, Player, PlayerId, ProgressionUnlock, UnlockKey, User, UserId, Username,
};

use super::error::RepoError;

// =============================================================================
// Accounts
// =============================================================================

/// Unique: username, email (when present).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn get(&self, id: &UserId) -> Result<Option<User>, RepoError>;
    async fn save(&self, user: &User) -> Result<(), RepoError>;
    async fn username_exists(&self, username: &Username) -> Result<bool, RepoError>;
    async fn email_exists(&self, email: &Email) -> Result<bool, RepoError>;
}

/// Unique: user id (one player per user).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: &PlayerId) -> Result<Option<Player>, RepoError>;
    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<Player>, RepoError>;
    async fn save(&self, player: &Player) -> Result<(), RepoError>;
}

// =============================================================================
// Network
// =============================================================================

/// Unique: IP address.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComputerRepo: Send + Sync {
    async fn get(&self, id: &ComputerId) -> Result<Option<Computer>, RepoError>;
    async fn save(&self, computer: &Computer) -> Result<(), RepoError>;
    async fn ip_address_exists(&self, ip: &IpAddress) -> Result<bool, RepoError>;
    async fn list_by_owner(&self, owner_id: &PlayerId) -> Result<Vec<Computer>, RepoError>;
}

/// Unique: defense type per computer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefenseRepo: Send + Sync {
    async fn get(&self, id: &DefenseId) -> Result<Option<Defense>, RepoError>;
    async fn save(&self, defense: &Defense) -> Result<(), RepoError>;
    async fn list_for_computer(&self, computer_id: &ComputerId)
        -> Result<Vec<Defense>, RepoError>;
}

// =============================================================================
// Gameplay
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HackOperationRepo: Send + Sync {
    async fn get(&self, id: &HackOperationId) -> Result<Option<HackOperation>, RepoError>;
    /// Inserts a new hack or records a status change on a stored one.
    ///
    /// Refused with `RepoError::ConstraintViolation` when the stored hack is
    /// already terminal or cannot move to the incoming status, so a write
    /// based on a stale read never overwrites a settled hack.
    async fn save(&self, hack: &HackOperation) -> Result<(), RepoError>;
    async fn list_by_status(&self, status: HackStatus) -> Result<Vec<HackOperation>, RepoError>;
}

/// Unique: unlock key per player.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressionUnlockRepo: Send + Sync {
    async fn find(
        &self,
        player_id: &PlayerId,
        unlock_key: &UnlockKey,
    ) -> Result<Option<ProgressionUnlock>, RepoError>;
    async fn save(&self, unlock: &ProgressionUnlock) -> Result<(), RepoError>;
    async fn list_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<ProgressionUnlock>, RepoError>;
}
