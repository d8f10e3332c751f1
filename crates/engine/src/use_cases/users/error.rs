//! Account operation errors.

use crate::infrastructure::ports::RepoError;
use netwatch_domain::{DomainError, UserId};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Username already taken")]
    UsernameTaken,
    #[error("Email already registered")]
    EmailTaken,
    #[error("User not found: {0}")]
    NotFound(UserId),
    #[error("Account suspended: {0}")]
    Suspended(UserId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
