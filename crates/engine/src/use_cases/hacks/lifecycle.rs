//! Attacker-driven transitions: start and abort.

use std::sync::Arc;

use netwatch_domain::{HackOperation, HackOperationId, HackStatus, PlayerId};

use crate::infrastructure::ports::HackOperationRepo;

use super::error::HackError;

/// Moves a pending hack to `in_progress`.
pub struct StartHack {
    hack_repo: Arc<dyn HackOperationRepo>,
}

impl StartHack {
    pub fn new(hack_repo: Arc<dyn HackOperationRepo>) -> Self {
        Self { hack_repo }
    }

    pub async fn execute(
        &self,
        hack_id: &HackOperationId,
        attacker_id: &PlayerId,
    ) -> Result<HackOperation, HackError> {
        transition_own_hack(
            self.hack_repo.as_ref(),
            hack_id,
            attacker_id,
            HackStatus::InProgress,
        )
        .await
    }
}

/// Abandons a pending or running hack.
pub struct AbortHack {
    hack_repo: Arc<dyn HackOperationRepo>,
}

impl AbortHack {
    pub fn new(hack_repo: Arc<dyn HackOperationRepo>) -> Self {
        Self { hack_repo }
    }

    pub async fn execute(
        &self,
        hack_id: &HackOperationId,
        attacker_id: &PlayerId,
    ) -> Result<HackOperation, HackError> {
        transition_own_hack(
            self.hack_repo.as_ref(),
            hack_id,
            attacker_id,
            HackStatus::Aborted,
        )
        .await
    }
}

async fn transition_own_hack(
    hack_repo: &dyn HackOperationRepo,
    hack_id: &HackOperationId,
    attacker_id: &PlayerId,
    to: HackStatus,
) -> Result<HackOperation, HackError> {
    let hack = hack_repo
        .get(hack_id)
        .await?
        .ok_or_else(|| HackError::NotFound(hack_id.clone()))?;

    if hack.attacker_id() != attacker_id {
        tracing::warn!(hack_id = %hack_id, player_id = %attacker_id, "Transition by non-attacker rejected");
        return Err(HackError::NotAttacker(hack_id.clone()));
    }

    let hack = hack.transition(to, None)?;
    hack_repo.save(&hack).await?;

    tracing::info!(hack_id = %hack_id, status = %to, "Hack status changed");
    Ok(hack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockHackOperationRepo;
    use chrono::Utc;
    use netwatch_domain::{ComputerId, DomainError, HackType, ToolLoadout};

    fn pending_hack(attacker: &PlayerId) -> HackOperation {
        HackOperation::create(
            HackOperationId::new(),
            attacker.clone(),
            ComputerId::new(),
            HackType::StealMoney,
            ToolLoadout::new(vec![]),
            300,
            Utc::now(),
        )
        .unwrap()
    }

    fn repo_with(hack: HackOperation, saves: usize) -> MockHackOperationRepo {
        let mut repo = MockHackOperationRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(hack.clone())));
        repo.expect_save().times(saves).returning(|_| Ok(()));
        repo
    }

    #[tokio::test]
    async fn attacker_starts_pending_hack() {
        let attacker = PlayerId::new();
        let hack = pending_hack(&attacker);
        let hack_id = hack.id().clone();

        let started = StartHack::new(Arc::new(repo_with(hack, 1)))
            .execute(&hack_id, &attacker)
            .await
            .unwrap();

        assert_eq!(started.status(), HackStatus::InProgress);
    }

    #[tokio::test]
    async fn only_the_attacker_may_abort() {
        let hack = pending_hack(&PlayerId::new());
        let hack_id = hack.id().clone();

        let result = AbortHack::new(Arc::new(repo_with(hack, 0)))
            .execute(&hack_id, &PlayerId::new())
            .await;

        assert!(matches!(result, Err(HackError::NotAttacker(_))));
    }

    #[tokio::test]
    async fn terminal_hack_cannot_be_restarted() {
        let attacker = PlayerId::new();
        let hack = pending_hack(&attacker)
            .transition(HackStatus::Aborted, None)
            .unwrap();
        let hack_id = hack.id().clone();

        let result = StartHack::new(Arc::new(repo_with(hack, 0)))
            .execute(&hack_id, &attacker)
            .await;

        assert!(matches!(
            result,
            Err(HackError::Validation(DomainError::InvalidTransition { .. }))
        ));
    }

    #[tokio::test]
    async fn missing_hack_is_reported() {
        let mut repo = MockHackOperationRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let result = AbortHack::new(Arc::new(repo))
            .execute(&HackOperationId::new(), &PlayerId::new())
            .await;

        assert!(matches!(result, Err(HackError::NotFound(_))));
    }
}
