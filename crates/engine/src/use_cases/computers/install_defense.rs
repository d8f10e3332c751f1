//! Install defense use case.

use std::sync::Arc;

use netwatch_domain::{ComputerId, Defense, DefenseId, DefenseType, PlayerId};

use crate::infrastructure::ports::{ClockPort, ComputerRepo, DefenseRepo, RandomPort};

use super::error::ComputerError;
use super::load_owned_computer;

/// Installs a level 1 defense. Owner only, one defense of each type per computer.
pub struct InstallDefense {
    computer_repo: Arc<dyn ComputerRepo>,
    defense_repo: Arc<dyn DefenseRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl InstallDefense {
    pub fn new(
        computer_repo: Arc<dyn ComputerRepo>,
        defense_repo: Arc<dyn DefenseRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            computer_repo,
            defense_repo,
            clock,
            random,
        }
    }

    pub async fn execute(
        &self,
        computer_id: &ComputerId,
        defense_type: DefenseType,
        requesting_player_id: &PlayerId,
    ) -> Result<Defense, ComputerError> {
        load_owned_computer(self.computer_repo.as_ref(), computer_id, requesting_player_id)
            .await?;

        let installed = self.defense_repo.list_for_computer(computer_id).await?;
        if installed.iter().any(|d| d.defense_type() == defense_type) {
            return Err(ComputerError::DefenseAlreadyInstalled(defense_type));
        }

        let defense = Defense::create(
            DefenseId::from_uuid(self.random.gen_uuid()),
            computer_id.clone(),
            defense_type,
            self.clock.now(),
        );
        self.defense_repo.save(&defense).await?;

        tracing::info!(
            computer_id = %computer_id,
            defense_type = %defense_type,
            "Defense installed"
        );
        Ok(defense)
    }
}
