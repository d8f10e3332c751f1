//! Computer aggregate - a virtual machine owned by a player
//!
//! Computers are the targets of hack operations and the hosts of defenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ComputerId, PlayerId};
use crate::value_objects::{ComputerName, IpAddress};

pub const DEFAULT_STORAGE: u32 = 1000;
pub const DEFAULT_CPU: u32 = 100;
pub const DEFAULT_MEMORY: u32 = 512;
pub const MAX_FIREWALL_LEVEL: u8 = 100;

/// Upgradable resource counters on a computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Storage,
    Cpu,
    Memory,

    /// Any name not listed above. Upgrading it changes nothing.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Storage => write!(f, "storage"),
            ResourceKind::Cpu => write!(f, "cpu"),
            ResourceKind::Memory => write!(f, "memory"),
            ResourceKind::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "storage" => ResourceKind::Storage,
            "cpu" => ResourceKind::Cpu,
            "memory" => ResourceKind::Memory,
            _ => ResourceKind::Unknown,
        })
    }
}

/// A player-owned virtual computer.
///
/// # Invariants
///
/// - `name` is 1-50 characters (enforced by `ComputerName`)
/// - `firewall_level` is in `0..=100`
/// - resource counters never go negative (unsigned, damage floors at zero)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComputerRecord", into = "ComputerRecord")]
pub struct Computer {
    id: ComputerId,
    owner_id: PlayerId,
    name: ComputerName,
    ip_address: IpAddress,
    created_at: DateTime<Utc>,
    storage: u32,
    cpu: u32,
    memory: u32,
    is_online: bool,
    firewall_level: u8,
}

impl Computer {
    /// Create a computer with the default resource profile, online, no firewall.
    pub fn create(
        id: ComputerId,
        owner_id: PlayerId,
        name: ComputerName,
        ip_address: IpAddress,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            ip_address,
            created_at: now,
            storage: DEFAULT_STORAGE,
            cpu: DEFAULT_CPU,
            memory: DEFAULT_MEMORY,
            is_online: true,
            firewall_level: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn id(&self) -> &ComputerId {
        &self.id
    }

    pub fn owner_id(&self) -> &PlayerId {
        &self.owner_id
    }

    pub fn name(&self) -> &ComputerName {
        &self.name
    }

    pub fn ip_address(&self) -> IpAddress {
        self.ip_address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn storage(&self) -> u32 {
        self.storage
    }

    pub fn cpu(&self) -> u32 {
        self.cpu
    }

    pub fn memory(&self) -> u32 {
        self.memory
    }

    pub fn is_online(&self) -> bool {
        self.is_online
    }

    pub fn firewall_level(&self) -> u8 {
        self.firewall_level
    }

    /// Online and not fully firewalled.
    pub fn is_vulnerable(&self) -> bool {
        self.is_online && self.firewall_level < MAX_FIREWALL_LEVEL
    }

    pub fn is_owned_by(&self, player_id: &PlayerId) -> bool {
        &self.owner_id == player_id
    }

    // ── Operations ───────────────────────────────────────────────────────

    pub fn go_online(&self) -> Self {
        Self {
            is_online: true,
            ..self.clone()
        }
    }

    pub fn go_offline(&self) -> Self {
        Self {
            is_online: false,
            ..self.clone()
        }
    }

    /// Subtracts damage from each counter independently, flooring at zero.
    pub fn apply_damage(&self, storage: u32, cpu: u32, memory: u32) -> Self {
        Self {
            storage: self.storage.saturating_sub(storage),
            cpu: self.cpu.saturating_sub(cpu),
            memory: self.memory.saturating_sub(memory),
            ..self.clone()
        }
    }

    /// Raises the firewall, capped at 100.
    pub fn upgrade_firewall(&self, amount: u8) -> Self {
        Self {
            firewall_level: self
                .firewall_level
                .saturating_add(amount)
                .min(MAX_FIREWALL_LEVEL),
            ..self.clone()
        }
    }

    /// Adds `amount` to one resource counter. `ResourceKind::Unknown` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the counter would exceed `u32::MAX`.
    pub fn upgrade_resource(&self, kind: ResourceKind, amount: u32) -> Result<Self, DomainError> {
        let add = |current: u32| {
            current.checked_add(amount).ok_or_else(|| {
                DomainError::overflow(format!("{} exceeds the representable range", kind))
            })
        };

        let mut next = self.clone();
        match kind {
            ResourceKind::Storage => next.storage = add(self.storage)?,
            ResourceKind::Cpu => next.cpu = add(self.cpu)?,
            ResourceKind::Memory => next.memory = add(self.memory)?,
            ResourceKind::Unknown => {}
        }
        Ok(next)
    }
}

// ============================================================================
// Storage snapshot
// ============================================================================

/// Flat snapshot of a [`Computer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerRecord {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
    pub storage: u32,
    pub cpu: u32,
    pub memory: u32,
    pub is_online: bool,
    pub firewall_level: u8,
}

impl TryFrom<ComputerRecord> for Computer {
    type Error = DomainError;

    fn try_from(record: ComputerRecord) -> Result<Self, Self::Error> {
        if record.firewall_level > MAX_FIREWALL_LEVEL {
            return Err(DomainError::validation(
                "Firewall level must be between 0 and 100",
            ));
        }
        Ok(Self {
            id: ComputerId::parse(record.id)?,
            owner_id: PlayerId::parse(record.owner_id)?,
            name: ComputerName::new(record.name)?,
            ip_address: record.ip_address.parse()?,
            created_at: record.created_at,
            storage: record.storage,
            cpu: record.cpu,
            memory: record.memory,
            is_online: record.is_online,
            firewall_level: record.firewall_level,
        })
    }
}

impl From<Computer> for ComputerRecord {
    fn from(computer: Computer) -> Self {
        Self {
            id: computer.id.into(),
            owner_id: computer.owner_id.into(),
            name: computer.name.into(),
            ip_address: computer.ip_address.into(),
            created_at: computer.created_at,
            storage: computer.storage,
            cpu: computer.cpu,
            memory: computer.memory,
            is_online: computer.is_online,
            firewall_level: computer.firewall_level,
        }
    }
}
