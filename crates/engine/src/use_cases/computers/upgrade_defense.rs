//! Upgrade defense use case.

use std::sync::Arc;

use netwatch_domain::{Defense, DefenseId, Money, PlayerId};

use crate::infrastructure::ports::{ComputerRepo, DefenseRepo, PlayerRepo};

use super::error::ComputerError;
use super::load_owned_computer;

/// Money charged per current defense level when upgrading.
pub const DEFENSE_UPGRADE_COST_PER_LEVEL: u64 = 100;

/// Cost of raising a defense from `level` to `level + 1`.
pub fn defense_upgrade_cost(level: u8) -> Money {
    Money::new(u64::from(level) * DEFENSE_UPGRADE_COST_PER_LEVEL)
}

/// Raises a defense one level, paid for by the computer's owner.
pub struct UpgradeDefense {
    player_repo: Arc<dyn PlayerRepo>,
    computer_repo: Arc<dyn ComputerRepo>,
    defense_repo: Arc<dyn DefenseRepo>,
}

impl UpgradeDefense {
    pub fn new(
        player_repo: Arc<dyn PlayerRepo>,
        computer_repo: Arc<dyn ComputerRepo>,
        defense_repo: Arc<dyn DefenseRepo>,
    ) -> Self {
        Self {
            player_repo,
            computer_repo,
            defense_repo,
        }
    }

    pub async fn execute(
        &self,
        defense_id: &DefenseId,
        requesting_player_id: &PlayerId,
    ) -> Result<Defense, ComputerError> {
        let defense = self
            .defense_repo
            .get(defense_id)
            .await?
            .ok_or_else(|| ComputerError::DefenseNotFound(defense_id.clone()))?;
        load_owned_computer(
            self.computer_repo.as_ref(),
            defense.computer_id(),
            requesting_player_id,
        )
        .await?;
        let player = self
            .player_repo
            .get(requesting_player_id)
            .await?
            .ok_or_else(|| ComputerError::PlayerNotFound(requesting_player_id.clone()))?;

        let cost = defense_upgrade_cost(defense.level());
        let upgraded = defense.upgrade()?;
        let player = player.spend_money(cost)?;

        self.defense_repo.save(&upgraded).await?;
        self.player_repo.save(&player).await?;

        tracing::info!(
            defense_id = %defense_id,
            level = upgraded.level(),
            cost = %cost,
            "Defense upgraded"
        );
        Ok(upgraded)
    }
}
