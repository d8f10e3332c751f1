//! Unlock progression use case.
//!
//! Eligibility per unlock type:
//! - `tool`: level 3 or higher
//! - `defense`: at least 500 money on hand (checked, not spent)
//! - `upgrade`, `skill`: always eligible

use std::sync::Arc;

use netwatch_domain::{
    Money, Player, PlayerId, ProgressionUnlock, ProgressionUnlockId, UnlockKey, UnlockType,
};

use crate::infrastructure::ports::{ClockPort, PlayerRepo, ProgressionUnlockRepo, RandomPort};

use super::error::ProgressionError;

pub const TOOL_UNLOCK_MIN_LEVEL: u32 = 3;
pub const DEFENSE_UNLOCK_MIN_MONEY: Money = Money::new(500);

/// Returns the unmet requirement, if any.
pub fn unmet_requirement(player: &Player, unlock_type: UnlockType) -> Option<String> {
    match unlock_type {
        UnlockType::Tool if player.level() < TOOL_UNLOCK_MIN_LEVEL => Some(format!(
            "Requires level {} or higher",
            TOOL_UNLOCK_MIN_LEVEL
        )),
        UnlockType::Defense if !player.can_afford(DEFENSE_UNLOCK_MIN_MONEY) => {
            Some("Insufficient funds".to_string())
        }
        _ => None,
    }
}

pub struct UnlockProgression {
    player_repo: Arc<dyn PlayerRepo>,
    unlock_repo: Arc<dyn ProgressionUnlockRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl UnlockProgression {
    pub fn new(
        player_repo: Arc<dyn PlayerRepo>,
        unlock_repo: Arc<dyn ProgressionUnlockRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            player_repo,
            unlock_repo,
            clock,
            random,
        }
    }

    pub async fn execute(
        &self,
        player_id: &PlayerId,
        unlock_type: UnlockType,
        unlock_key: &str,
    ) -> Result<ProgressionUnlock, ProgressionError> {
        let unlock_key = UnlockKey::new(unlock_key)?;
        let player = self
            .player_repo
            .get(player_id)
            .await?
            .ok_or_else(|| ProgressionError::PlayerNotFound(player_id.clone()))?;

        if self.unlock_repo.find(player_id, &unlock_key).await?.is_some() {
            return Err(ProgressionError::AlreadyUnlocked(unlock_key));
        }
        if let Some(requirement) = unmet_requirement(&player, unlock_type) {
            tracing::warn!(
                player_id = %player_id,
                unlock_key = %unlock_key,
                requirement = %requirement,
                "Unlock refused"
            );
            return Err(ProgressionError::RequirementNotMet(requirement));
        }

        let unlock = ProgressionUnlock::create(
            ProgressionUnlockId::from_uuid(self.random.gen_uuid()),
            player_id.clone(),
            unlock_type,
            unlock_key,
            self.clock.now(),
        );
        self.unlock_repo.save(&unlock).await?;

        tracing::info!(
            player_id = %player_id,
            unlock_type = %unlock_type,
            unlock_key = %unlock.unlock_key(),
            "Progression unlocked"
        );
        Ok(unlock)
    }
}
