//! Player operation errors.

use crate::infrastructure::ports::RepoError;
use netwatch_domain::{DomainError, PlayerId, UserId};

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Player not found: {0}")]
    NotFound(PlayerId),
    #[error("User not found: {0}")]
    UserNotFound(UserId),
    #[error("User {0} already has a player")]
    AlreadyExists(UserId),
    #[error("Player {0} belongs to another user")]
    Forbidden(PlayerId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
