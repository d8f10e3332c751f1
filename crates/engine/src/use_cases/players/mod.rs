//! Player use cases.

mod create_player;
mod energy;
mod error;
mod get_player_profile;

use std::sync::Arc;

pub use create_player::CreatePlayer;
pub use energy::{IncreaseEnergyCapacity, RegenerateEnergy, CAPACITY_UPGRADE_SKILL_COST};
pub use error::PlayerError;
pub use get_player_profile::{GetPlayerProfile, PlayerProfile};

/// Container for player use cases.
pub struct PlayerUseCases {
    pub create: Arc<CreatePlayer>,
    pub profile: Arc<GetPlayerProfile>,
    pub regenerate_energy: Arc<RegenerateEnergy>,
    pub increase_energy_capacity: Arc<IncreaseEnergyCapacity>,
}

impl PlayerUseCases {
    pub fn new(
        create: Arc<CreatePlayer>,
        profile: Arc<GetPlayerProfile>,
        regenerate_energy: Arc<RegenerateEnergy>,
        increase_energy_capacity: Arc<IncreaseEnergyCapacity>,
    ) -> Self {
        Self {
            create,
            profile,
            regenerate_energy,
            increase_energy_capacity,
        }
    }
}
