//! Player profile query.

use std::sync::Arc;

use netwatch_domain::{Computer, Player, PlayerId, ProgressionUnlock, UserId};
use serde::Serialize;

use crate::infrastructure::ports::{ComputerRepo, PlayerRepo, ProgressionUnlockRepo};

use super::error::PlayerError;

/// Everything the owning user sees about their player.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub player: Player,
    pub level: u32,
    pub computers: Vec<Computer>,
    pub unlocks: Vec<ProgressionUnlock>,
}

/// Only the user who owns the player may read the profile.
pub struct GetPlayerProfile {
    player_repo: Arc<dyn PlayerRepo>,
    computer_repo: Arc<dyn ComputerRepo>,
    unlock_repo: Arc<dyn ProgressionUnlockRepo>,
}

impl GetPlayerProfile {
    pub fn new(
        player_repo: Arc<dyn PlayerRepo>,
        computer_repo: Arc<dyn ComputerRepo>,
        unlock_repo: Arc<dyn ProgressionUnlockRepo>,
    ) -> Self {
        Self {
            player_repo,
            computer_repo,
            unlock_repo,
        }
    }

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        requesting_user_id: &UserId,
    ) -> Result<PlayerProfile, PlayerError> {
        let player = self
            .player_repo
            .get(player_id)
            .await?
            .ok_or_else(|| PlayerError::NotFound(player_id.clone()))?;

        if player.user_id() != requesting_user_id {
            tracing::warn!(
                player_id = %player_id,
                user_id = %requesting_user_id,
                "Profile access denied"
            );
            return Err(PlayerError::Forbidden(player_id.clone()));
        }

        let computers = self.computer_repo.list_by_owner(player_id).await?;
        let unlocks = self.unlock_repo.list_for_player(player_id).await?;

        Ok(PlayerProfile {
            level: player.level(),
            player,
            computers,
            unlocks,
        })
    }
}
