//! Computer use cases: creation, defenses and maintenance.

mod create_computer;
mod error;
mod install_defense;
mod maintenance;
mod upgrade_defense;

use std::sync::Arc;

use netwatch_domain::{Computer, ComputerId, PlayerId};

use crate::infrastructure::ports::ComputerRepo;

pub use create_computer::CreateComputer;
pub use error::ComputerError;
pub use install_defense::InstallDefense;
pub use maintenance::{
    SetComputerOnline, UpgradeFirewall, UpgradeResource, FIREWALL_COST_PER_POINT,
    RESOURCE_COST_PER_UNIT,
};
pub use upgrade_defense::{defense_upgrade_cost, UpgradeDefense, DEFENSE_UPGRADE_COST_PER_LEVEL};

/// Container for computer use cases.
pub struct ComputerUseCases {
    pub create: Arc<CreateComputer>,
    pub install_defense: Arc<InstallDefense>,
    pub upgrade_defense: Arc<UpgradeDefense>,
    pub upgrade_firewall: Arc<UpgradeFirewall>,
    pub upgrade_resource: Arc<UpgradeResource>,
    pub set_online: Arc<SetComputerOnline>,
}

/// Loads a computer and checks that `player_id` owns it.
pub(crate) async fn load_owned_computer(
    computer_repo: &dyn ComputerRepo,
    computer_id: &ComputerId,
    player_id: &PlayerId,
) -> Result<Computer, ComputerError> {
    let computer = computer_repo
        .get(computer_id)
        .await?
        .ok_or_else(|| ComputerError::NotFound(computer_id.clone()))?;

    if !computer.is_owned_by(player_id) {
        tracing::warn!(
            computer_id = %computer_id,
            player_id = %player_id,
            "Rejected operation on a computer owned by another player"
        );
        return Err(ComputerError::Forbidden(computer_id.clone()));
    }
    Ok(computer)
}
