//! Hack operation errors.

use crate::infrastructure::ports::RepoError;
use netwatch_domain::{ComputerId, DomainError, HackOperationId, PlayerId};

#[derive(Debug, thiserror::Error)]
pub enum HackError {
    #[error("Hack operation not found: {0}")]
    NotFound(HackOperationId),
    #[error("Attacker not found: {0}")]
    AttackerNotFound(PlayerId),
    #[error("Target computer not found: {0}")]
    TargetNotFound(ComputerId),
    #[error("Owner of target computer not found: {0}")]
    TargetOwnerNotFound(PlayerId),
    #[error("Cannot hack own computer")]
    SelfHack,
    #[error("Target computer {0} is offline or fully firewalled")]
    TargetNotVulnerable(ComputerId),
    #[error("Player is not the attacker of hack operation {0}")]
    NotAttacker(HackOperationId),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
