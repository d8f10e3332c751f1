//! Progression errors.

use crate::infrastructure::ports::RepoError;
use netwatch_domain::{DomainError, PlayerId, UnlockKey};

#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),
    #[error("Already unlocked: {0}")]
    AlreadyUnlocked(UnlockKey),
    #[error("Requirement not met: {0}")]
    RequirementNotMet(String),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
