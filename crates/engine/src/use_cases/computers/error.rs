//! Computer and defense operation errors.

use crate::infrastructure::ports::RepoError;
use netwatch_domain::{ComputerId, DefenseId, DefenseType, DomainError, PlayerId};

#[derive(Debug, thiserror::Error)]
pub enum ComputerError {
    #[error("Computer not found: {0}")]
    NotFound(ComputerId),
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Defense not found: {0}")]
    DefenseNotFound(DefenseId),
    #[error("Computer {0} is owned by another player")]
    Forbidden(ComputerId),
    #[error("A {0} defense is already installed")]
    DefenseAlreadyInstalled(DefenseType),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
