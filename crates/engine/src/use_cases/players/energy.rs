//! Energy use cases: periodic regeneration and capacity upgrades.

use std::sync::Arc;

use netwatch_domain::{Player, PlayerId};

use crate::infrastructure::ports::PlayerRepo;

use super::error::PlayerError;

/// Skill points spent per capacity upgrade.
pub const CAPACITY_UPGRADE_SKILL_COST: u32 = 1;

/// Restores a fixed amount of energy and re-derives capacity from level.
pub struct RegenerateEnergy {
    player_repo: Arc<dyn PlayerRepo>,
    amount: u32,
}

impl RegenerateEnergy {
    pub fn new(player_repo: Arc<dyn PlayerRepo>, amount: u32) -> Self {
        Self {
            player_repo,
            amount,
        }
    }

    pub async fn execute(&self, player_id: &PlayerId) -> Result<Player, PlayerError> {
        let player = self
            .player_repo
            .get(player_id)
            .await?
            .ok_or_else(|| PlayerError::NotFound(player_id.clone()))?;

        let player = player.regenerate_energy(self.amount)?;
        self.player_repo.save(&player).await?;

        tracing::debug!(
            player_id = %player_id,
            energy = player.energy().current(),
            max = player.energy().max(),
            "Energy regenerated"
        );
        Ok(player)
    }
}

/// Spends a skill point to raise capacity to the next level's ceiling.
pub struct IncreaseEnergyCapacity {
    player_repo: Arc<dyn PlayerRepo>,
}

impl IncreaseEnergyCapacity {
    pub fn new(player_repo: Arc<dyn PlayerRepo>) -> Self {
        Self { player_repo }
    }

    pub async fn execute(&self, player_id: &PlayerId) -> Result<Player, PlayerError> {
        let player = self
            .player_repo
            .get(player_id)
            .await?
            .ok_or_else(|| PlayerError::NotFound(player_id.clone()))?;

        let player = player
            .consume_skill_points(CAPACITY_UPGRADE_SKILL_COST)?
            .increase_energy_capacity()?;
        self.player_repo.save(&player).await?;

        tracing::info!(
            player_id = %player_id,
            max = player.energy().max(),
            "Energy capacity increased"
        );
        Ok(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockPlayerRepo;
    use chrono::Utc;
    use netwatch_domain::{DisplayName, DomainError, UserId};

    fn player() -> Player {
        Player::create(
            PlayerId::new(),
            UserId::new(),
            DisplayName::new("cereal").unwrap(),
            Utc::now(),
        )
    }

    fn repo_with(player: Player, saves: usize) -> MockPlayerRepo {
        let mut repo = MockPlayerRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(player.clone())));
        repo.expect_save().times(saves).returning(|_| Ok(()));
        repo
    }

    #[tokio::test]
    async fn regeneration_refills_up_to_capacity() {
        let drained = player().consume_energy(30).unwrap();
        let player_id = drained.id().clone();

        let player = RegenerateEnergy::new(Arc::new(repo_with(drained, 1)), 5)
            .execute(&player_id)
            .await
            .unwrap();

        assert_eq!(player.energy().current(), 75);
        assert_eq!(player.energy().max(), 100);
    }

    #[tokio::test]
    async fn capacity_upgrade_costs_a_skill_point() {
        let player = player().add_skill_points(1).unwrap();
        let player_id = player.id().clone();

        let upgraded = IncreaseEnergyCapacity::new(Arc::new(repo_with(player, 1)))
            .execute(&player_id)
            .await
            .unwrap();

        assert_eq!(upgraded.skill_points(), 0);
        assert_eq!(upgraded.energy().max(), 110);
    }

    #[tokio::test]
    async fn capacity_upgrade_without_skill_points_is_refused() {
        let player = player();
        let player_id = player.id().clone();

        let result = IncreaseEnergyCapacity::new(Arc::new(repo_with(player, 0)))
            .execute(&player_id)
            .await;

        assert!(matches!(
            result,
            Err(PlayerError::Validation(
                DomainError::InsufficientSkillPoints { .. }
            ))
        ));
    }
}
