//! Initiate hack use case.
//!
//! Creates a pending hack against another player's computer and charges the
//! attacker's energy for it.

use std::sync::Arc;

use netwatch_domain::{
    ComputerId, HackOperation, HackOperationId, HackType, PlayerId, ToolLoadout,
};

use crate::infrastructure::ports::{
    ClockPort, ComputerRepo, HackOperationRepo, PlayerRepo, RandomPort,
};

use super::error::HackError;

pub struct InitiateHack {
    player_repo: Arc<dyn PlayerRepo>,
    computer_repo: Arc<dyn ComputerRepo>,
    hack_repo: Arc<dyn HackOperationRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    energy_cost: u32,
    duration_secs: u32,
}

impl InitiateHack {
    pub fn new(
        player_repo: Arc<dyn PlayerRepo>,
        computer_repo: Arc<dyn ComputerRepo>,
        hack_repo: Arc<dyn HackOperationRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        energy_cost: u32,
        duration_secs: u32,
    ) -> Self {
        Self {
            player_repo,
            computer_repo,
            hack_repo,
            clock,
            random,
            energy_cost,
            duration_secs,
        }
    }

    pub async fn execute(
        &self,
        attacker_id: &PlayerId,
        target_computer_id: &ComputerId,
        hack_type: HackType,
        tools: Vec<String>,
    ) -> Result<HackOperation, HackError> {
        let attacker = self
            .player_repo
            .get(attacker_id)
            .await?
            .ok_or_else(|| HackError::AttackerNotFound(attacker_id.clone()))?;
        let target = self
            .computer_repo
            .get(target_computer_id)
            .await?
            .ok_or_else(|| HackError::TargetNotFound(target_computer_id.clone()))?;

        let owner = self
            .player_repo
            .get(target.owner_id())
            .await?
            .ok_or_else(|| HackError::TargetOwnerNotFound(target.owner_id().clone()))?;

        if owner.id() == attacker_id {
            tracing::warn!(attacker_id = %attacker_id, computer_id = %target_computer_id, "Self-hack rejected");
            return Err(HackError::SelfHack);
        }
        if !target.is_vulnerable() {
            return Err(HackError::TargetNotVulnerable(target_computer_id.clone()));
        }

        let attacker = attacker.consume_energy(self.energy_cost)?;
        let hack = HackOperation::create(
            HackOperationId::from_uuid(self.random.gen_uuid()),
            attacker_id.clone(),
            target_computer_id.clone(),
            hack_type,
            ToolLoadout::new(tools),
            self.duration_secs,
            self.clock.now(),
        )?;

        self.player_repo.save(&attacker).await?;
        self.hack_repo.save(&hack).await?;

        tracing::info!(
            hack_id = %hack.id(),
            attacker_id = %attacker_id,
            target = %target.ip_address(),
            hack_type = %hack_type,
            completion_at = %hack.completion_at(),
            "Hack initiated"
        );
        Ok(hack)
    }
}
