//! Owner-only computer maintenance: firewall, hardware and power state.
//!
//! Upgrades are charged only for what is actually applied, so a firewall
//! capped at 100 or an unrecognised resource costs nothing.

use std::sync::Arc;

use netwatch_domain::{Computer, ComputerId, Money, PlayerId, ResourceKind};

use crate::infrastructure::ports::{ComputerRepo, PlayerRepo};

use super::error::ComputerError;
use super::load_owned_computer;

pub const FIREWALL_COST_PER_POINT: u64 = 10;
pub const RESOURCE_COST_PER_UNIT: u64 = 1;

pub struct UpgradeFirewall {
    player_repo: Arc<dyn PlayerRepo>,
    computer_repo: Arc<dyn ComputerRepo>,
}

impl UpgradeFirewall {
    pub fn new(player_repo: Arc<dyn PlayerRepo>, computer_repo: Arc<dyn ComputerRepo>) -> Self {
        Self {
            player_repo,
            computer_repo,
        }
    }

    pub async fn execute(
        &self,
        computer_id: &ComputerId,
        requesting_player_id: &PlayerId,
        amount: u8,
    ) -> Result<Computer, ComputerError> {
        let computer =
            load_owned_computer(self.computer_repo.as_ref(), computer_id, requesting_player_id)
                .await?;

        let upgraded = computer.upgrade_firewall(amount);
        let applied = upgraded.firewall_level() - computer.firewall_level();
        let cost = Money::new(u64::from(applied) * FIREWALL_COST_PER_POINT);

        charge(self.player_repo.as_ref(), requesting_player_id, cost).await?;
        self.computer_repo.save(&upgraded).await?;

        tracing::info!(
            computer_id = %computer_id,
            firewall = upgraded.firewall_level(),
            cost = %cost,
            "Firewall upgraded"
        );
        Ok(upgraded)
    }
}

pub struct UpgradeResource {
    player_repo: Arc<dyn PlayerRepo>,
    computer_repo: Arc<dyn ComputerRepo>,
}

impl UpgradeResource {
    pub fn new(player_repo: Arc<dyn PlayerRepo>, computer_repo: Arc<dyn ComputerRepo>) -> Self {
        Self {
            player_repo,
            computer_repo,
        }
    }

    pub async fn execute(
        &self,
        computer_id: &ComputerId,
        requesting_player_id: &PlayerId,
        kind: ResourceKind,
        amount: u32,
    ) -> Result<Computer, ComputerError> {
        let computer =
            load_owned_computer(self.computer_repo.as_ref(), computer_id, requesting_player_id)
                .await?;

        let upgraded = computer.upgrade_resource(kind, amount)?;
        if upgraded == computer {
            tracing::debug!(computer_id = %computer_id, kind = %kind, "Resource upgrade had no effect");
            return Ok(computer);
        }

        let cost = Money::new(u64::from(amount) * RESOURCE_COST_PER_UNIT);
        charge(self.player_repo.as_ref(), requesting_player_id, cost).await?;
        self.computer_repo.save(&upgraded).await?;

        tracing::info!(computer_id = %computer_id, kind = %kind, amount, "Resource upgraded");
        Ok(upgraded)
    }
}

pub struct SetComputerOnline {
    computer_repo: Arc<dyn ComputerRepo>,
}

impl SetComputerOnline {
    pub fn new(computer_repo: Arc<dyn ComputerRepo>) -> Self {
        Self { computer_repo }
    }

    pub async fn execute(
        &self,
        computer_id: &ComputerId,
        requesting_player_id: &PlayerId,
        online: bool,
    ) -> Result<Computer, ComputerError> {
        let computer =
            load_owned_computer(self.computer_repo.as_ref(), computer_id, requesting_player_id)
                .await?;

        let computer = if online {
            computer.go_online()
        } else {
            computer.go_offline()
        };
        self.computer_repo.save(&computer).await?;

        tracing::info!(computer_id = %computer_id, online, "Computer power state changed");
        Ok(computer)
    }
}

async fn charge(
    player_repo: &dyn PlayerRepo,
    player_id: &PlayerId,
    cost: Money,
) -> Result<(), ComputerError> {
    if cost.is_zero() {
        return Ok(());
    }
    let player = player_repo
        .get(player_id)
        .await?
        .ok_or_else(|| ComputerError::PlayerNotFound(player_id.clone()))?;
    player_repo.save(&player.spend_money(cost)?).await?;
    Ok(())
}
