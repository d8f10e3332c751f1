//! In-memory persistence adapter.
//!
//! Each repo keeps its aggregates in a `DashMap` plus one index map per
//! uniqueness constraint. Index slots are claimed through the entry API, so
//! two concurrent saves racing for the same key cannot both win.

use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use netwatch_domain::{
    Computer, ComputerId, Defense, DefenseId, DefenseType, Email, HackOperation, HackOperationId,
    HackStatus, IpAddress, Player, PlayerId, ProgressionUnlock, UnlockKey, User, UserId, Username,
};

use crate::infrastructure::ports::{
    ComputerRepo, DefenseRepo, HackOperationRepo, PlayerRepo, ProgressionUnlockRepo, RepoError,
    UserRepo,
};

/// All in-memory repositories, ready to be handed to `App::new`.
pub struct InMemoryRepositories {
    pub user: Arc<InMemoryUserRepo>,
    pub player: Arc<InMemoryPlayerRepo>,
    pub computer: Arc<InMemoryComputerRepo>,
    pub defense: Arc<InMemoryDefenseRepo>,
    pub hack_operation: Arc<InMemoryHackOperationRepo>,
    pub progression_unlock: Arc<InMemoryProgressionUnlockRepo>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            user: Arc::new(InMemoryUserRepo::default()),
            player: Arc::new(InMemoryPlayerRepo::default()),
            computer: Arc::new(InMemoryComputerRepo::default()),
            defense: Arc::new(InMemoryDefenseRepo::default()),
            hack_operation: Arc::new(InMemoryHackOperationRepo::default()),
            progression_unlock: Arc::new(InMemoryProgressionUnlockRepo::default()),
        }
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

/// Claims `key` for `owner`. Returns `true` when the slot was newly taken.
fn claim<K, V>(index: &DashMap<K, V>, key: K, owner: &V, what: &str) -> Result<bool, RepoError>
where
    K: Eq + Hash + std::fmt::Display,
    V: Clone + PartialEq,
{
    match index.entry(key) {
        Entry::Occupied(entry) if entry.get() != owner => Err(RepoError::constraint(format!(
            "{what} {} already in use",
            entry.key()
        ))),
        Entry::Occupied(_) => Ok(false),
        Entry::Vacant(entry) => {
            entry.insert(owner.clone());
            Ok(true)
        }
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: DashMap<UserId, User>,
    usernames: DashMap<String, UserId>,
    emails: DashMap<String, UserId>,
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn get(&self, id: &UserId) -> Result<Option<User>, RepoError> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, user: &User) -> Result<(), RepoError> {
        let username = user.username().as_str().to_string();
        let newly_claimed = claim(&self.usernames, username.clone(), user.id(), "Username")?;

        if let Some(email) = user.email() {
            if let Err(e) = claim(&self.emails, email.as_str().to_string(), user.id(), "Email") {
                if newly_claimed {
                    self.usernames.remove(&username);
                }
                return Err(e);
            }
        }

        self.users.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, RepoError> {
        Ok(self.usernames.contains_key(username.as_str()))
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, RepoError> {
        Ok(self.emails.contains_key(email.as_str()))
    }
}

// =============================================================================
// Players
// =============================================================================

#[derive(Default)]
pub struct InMemoryPlayerRepo {
    players: DashMap<PlayerId, Player>,
    by_user: DashMap<UserId, PlayerId>,
}

#[async_trait]
impl PlayerRepo for InMemoryPlayerRepo {
    async fn get(&self, id: &PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self.players.get(id).map(|entry| entry.value().clone()))
    }

    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<Player>, RepoError> {
        let Some(player_id) = self.by_user.get(user_id).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        Ok(self.players.get(&player_id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        claim(&self.by_user, player.user_id().clone(), player.id(), "Player for user")?;
        self.players.insert(player.id().clone(), player.clone());
        Ok(())
    }
}

// =============================================================================
// Computers
// =============================================================================

#[derive(Default)]
pub struct InMemoryComputerRepo {
    computers: DashMap<ComputerId, Computer>,
    addresses: DashMap<IpAddress, ComputerId>,
}

#[async_trait]
impl ComputerRepo for InMemoryComputerRepo {
    async fn get(&self, id: &ComputerId) -> Result<Option<Computer>, RepoError> {
        Ok(self.computers.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, computer: &Computer) -> Result<(), RepoError> {
        claim(
            &self.addresses,
            computer.ip_address(),
            computer.id(),
            "IP address",
        )?;
        self.computers.insert(computer.id().clone(), computer.clone());
        Ok(())
    }

    async fn ip_address_exists(&self, ip: &IpAddress) -> Result<bool, RepoError> {
        Ok(self.addresses.contains_key(ip))
    }

    async fn list_by_owner(&self, owner_id: &PlayerId) -> Result<Vec<Computer>, RepoError> {
        let mut computers: Vec<Computer> = self
            .computers
            .iter()
            .filter(|entry| entry.value().is_owned_by(owner_id))
            .map(|entry| entry.value().clone())
            .collect();
        computers.sort_by_key(|c| c.created_at());
        Ok(computers)
    }
}

// =============================================================================
// Defenses
// =============================================================================

/// Index key for the one-defense-per-type rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DefenseSlot(ComputerId, DefenseType);

impl std::fmt::Display for DefenseSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on computer {}", self.1, self.0)
    }
}

#[derive(Default)]
pub struct InMemoryDefenseRepo {
    defenses: DashMap<DefenseId, Defense>,
    slots: DashMap<DefenseSlot, DefenseId>,
}

#[async_trait]
impl DefenseRepo for InMemoryDefenseRepo {
    async fn get(&self, id: &DefenseId) -> Result<Option<Defense>, RepoError> {
        Ok(self.defenses.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, defense: &Defense) -> Result<(), RepoError> {
        let slot = DefenseSlot(defense.computer_id().clone(), defense.defense_type());
        claim(&self.slots, slot, defense.id(), "Defense")?;
        self.defenses.insert(defense.id().clone(), defense.clone());
        Ok(())
    }

    async fn list_for_computer(
        &self,
        computer_id: &ComputerId,
    ) -> Result<Vec<Defense>, RepoError> {
        let mut defenses: Vec<Defense> = self
            .defenses
            .iter()
            .filter(|entry| entry.value().computer_id() == computer_id)
            .map(|entry| entry.value().clone())
            .collect();
        defenses.sort_by_key(|d| d.installed_at());
        Ok(defenses)
    }
}

// =============================================================================
// Hack operations
// =============================================================================

/// Stored status `from` may be replaced by `to`: a legal transition, or a
/// resave of a hack that is still open.
fn accepts_write(from: HackStatus, to: HackStatus) -> bool {
    from.can_transition_to(to) || (from == to && !from.is_terminal())
}

#[derive(Default)]
pub struct InMemoryHackOperationRepo {
    hacks: DashMap<HackOperationId, HackOperation>,
}

#[async_trait]
impl HackOperationRepo for InMemoryHackOperationRepo {
    async fn get(&self, id: &HackOperationId) -> Result<Option<HackOperation>, RepoError> {
        Ok(self.hacks.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, hack: &HackOperation) -> Result<(), RepoError> {
        match self.hacks.entry(hack.id().clone()) {
            Entry::Occupied(entry) if !accepts_write(entry.get().status(), hack.status()) => {
                Err(RepoError::constraint(format!(
                    "Hack operation {} is {} and cannot become {}",
                    hack.id(),
                    entry.get().status(),
                    hack.status()
                )))
            }
            Entry::Occupied(mut entry) => {
                entry.insert(hack.clone());
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(hack.clone());
                Ok(())
            }
        }
    }

    async fn list_by_status(&self, status: HackStatus) -> Result<Vec<HackOperation>, RepoError> {
        let mut hacks: Vec<HackOperation> = self
            .hacks
            .iter()
            .filter(|entry| entry.value().status() == status)
            .map(|entry| entry.value().clone())
            .collect();
        hacks.sort_by_key(|h| h.completion_at());
        Ok(hacks)
    }
}

// =============================================================================
// Progression unlocks
// =============================================================================

#[derive(Default)]
pub struct InMemoryProgressionUnlockRepo {
    unlocks: DashMap<(PlayerId, UnlockKey), ProgressionUnlock>,
}

#[async_trait]
impl ProgressionUnlockRepo for InMemoryProgressionUnlockRepo {
    async fn find(
        &self,
        player_id: &PlayerId,
        unlock_key: &UnlockKey,
    ) -> Result<Option<ProgressionUnlock>, RepoError> {
        let key = (player_id.clone(), unlock_key.clone());
        Ok(self.unlocks.get(&key).map(|entry| entry.value().clone()))
    }

    async fn save(&self, unlock: &ProgressionUnlock) -> Result<(), RepoError> {
        let key = (unlock.player_id().clone(), unlock.unlock_key().clone());
        match self.unlocks.entry(key) {
            Entry::Occupied(entry) if entry.get().id() != unlock.id() => {
                Err(RepoError::constraint(format!(
                    "Unlock {} already granted to player {}",
                    unlock.unlock_key(),
                    unlock.player_id()
                )))
            }
            Entry::Occupied(mut entry) => {
                entry.insert(unlock.clone());
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(unlock.clone());
                Ok(())
            }
        }
    }

    async fn list_for_player(
        &self,
        player_id: &PlayerId,
    ) -> Result<Vec<ProgressionUnlock>, RepoError> {
        let mut unlocks: Vec<ProgressionUnlock> = self
            .unlocks
            .iter()
            .filter(|entry| entry.value().player_id() == player_id)
            .map(|entry| entry.value().clone())
            .collect();
        unlocks.sort_by_key(|u| u.unlocked_at());
        Ok(unlocks)
    }
}
