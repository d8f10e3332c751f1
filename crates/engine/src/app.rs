//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::EngineConfig,
    memory::InMemoryRepositories,
    ports::{
        ClockPort, ComputerRepo, DefenseRepo, HackOperationRepo, PlayerRepo,
        ProgressionUnlockRepo, RandomPort, UserRepo,
    },
};
use crate::use_cases::{self, computers, hacks, players, progression, users};

/// Main application state.
///
/// Holds all repository ports and use cases.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub config: EngineConfig,
}

/// Container for all repository ports.
pub struct Repositories {
    pub user: Arc<dyn UserRepo>,
    pub player: Arc<dyn PlayerRepo>,
    pub computer: Arc<dyn ComputerRepo>,
    pub defense: Arc<dyn DefenseRepo>,
    pub hack_operation: Arc<dyn HackOperationRepo>,
    pub progression_unlock: Arc<dyn ProgressionUnlockRepo>,
}

impl From<InMemoryRepositories> for Repositories {
    fn from(repos: InMemoryRepositories) -> Self {
        Self {
            user: repos.user,
            player: repos.player,
            computer: repos.computer,
            defense: repos.defense,
            hack_operation: repos.hack_operation,
            progression_unlock: repos.progression_unlock,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub users: use_cases::UserUseCases,
    pub players: use_cases::PlayerUseCases,
    pub computers: use_cases::ComputerUseCases,
    pub hacks: use_cases::HackUseCases,
    pub unlock_progression: Arc<progression::UnlockProgression>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repos: Repositories,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        config: EngineConfig,
    ) -> Self {
        let users = users::UserUseCases::new(
            Arc::new(users::RegisterUser::new(
                repos.user.clone(),
                clock.clone(),
                random.clone(),
            )),
            Arc::new(users::RecordLogin::new(repos.user.clone(), clock.clone())),
            Arc::new(users::SetUserActive::new(repos.user.clone())),
        );

        let players = players::PlayerUseCases::new(
            Arc::new(players::CreatePlayer::new(
                repos.user.clone(),
                repos.player.clone(),
                clock.clone(),
                random.clone(),
            )),
            Arc::new(players::GetPlayerProfile::new(
                repos.player.clone(),
                repos.computer.clone(),
                repos.progression_unlock.clone(),
            )),
            Arc::new(players::RegenerateEnergy::new(
                repos.player.clone(),
                config.energy_regen_amount,
            )),
            Arc::new(players::IncreaseEnergyCapacity::new(repos.player.clone())),
        );

        let computers = computers::ComputerUseCases {
            create: Arc::new(computers::CreateComputer::new(
                repos.player.clone(),
                repos.computer.clone(),
                clock.clone(),
                random.clone(),
                config.computer_create_attempts,
            )),
            install_defense: Arc::new(computers::InstallDefense::new(
                repos.computer.clone(),
                repos.defense.clone(),
                clock.clone(),
                random.clone(),
            )),
            upgrade_defense: Arc::new(computers::UpgradeDefense::new(
                repos.player.clone(),
                repos.computer.clone(),
                repos.defense.clone(),
            )),
            upgrade_firewall: Arc::new(computers::UpgradeFirewall::new(
                repos.player.clone(),
                repos.computer.clone(),
            )),
            upgrade_resource: Arc::new(computers::UpgradeResource::new(
                repos.player.clone(),
                repos.computer.clone(),
            )),
            set_online: Arc::new(computers::SetComputerOnline::new(repos.computer.clone())),
        };

        let hacks = hacks::HackUseCases {
            initiate: Arc::new(hacks::InitiateHack::new(
                repos.player.clone(),
                repos.computer.clone(),
                repos.hack_operation.clone(),
                clock.clone(),
                random.clone(),
                config.hack_energy_cost,
                config.hack_duration_secs,
            )),
            start: Arc::new(hacks::StartHack::new(repos.hack_operation.clone())),
            abort: Arc::new(hacks::AbortHack::new(repos.hack_operation.clone())),
            resolve_due: Arc::new(hacks::ResolveDueHacks::new(
                repos.hack_operation.clone(),
                repos.player.clone(),
                repos.computer.clone(),
                repos.defense.clone(),
                clock.clone(),
                random.clone(),
            )),
        };

        let unlock_progression = Arc::new(progression::UnlockProgression::new(
            repos.player.clone(),
            repos.progression_unlock.clone(),
            clock,
            random,
        ));

        Self {
            repositories: repos,
            use_cases: UseCases {
                users,
                players,
                computers,
                hacks,
                unlock_progression,
            },
            config,
        }
    }

    /// App over fresh in-memory storage.
    pub fn in_memory(
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        config: EngineConfig,
    ) -> Self {
        Self::new(InMemoryRepositories::new().into(), clock, random, config)
    }
}
