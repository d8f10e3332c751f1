//! Player aggregate - the game-facing profile of a user
//!
//! # Rustic DDD Design
//!
//! - **Private fields**: energy, money and progression are only changed through methods
//! - **Copy-on-write**: every operation takes `&self` and returns a new `Player`
//! - **Derived level**: level is computed from experience on demand and never stored

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{PlayerId, UserId};
use crate::value_objects::{DisplayName, Energy, Money};

/// Energy capacity of a level 0 player.
pub const BASE_ENERGY: u32 = 100;

/// Extra energy capacity granted per level.
pub const ENERGY_PER_LEVEL: u32 = 10;

const EXPERIENCE_PER_LEVEL_UNIT: u64 = 100;

/// Energy capacity for a given level: `100 + level * 10`.
pub fn energy_capacity_for_level(level: u32) -> u32 {
    BASE_ENERGY.saturating_add(level.saturating_mul(ENERGY_PER_LEVEL))
}

/// `floor(sqrt(experience / 100))`, computed exactly in integers.
pub fn level_for_experience(experience: u64) -> u32 {
    let units = experience / EXPERIENCE_PER_LEVEL_UNIT;
    // Float estimate, then correct for rounding at large magnitudes.
    let mut root = (units as f64).sqrt() as u64;
    while root.saturating_mul(root) > units {
        root -= 1;
    }
    while (root + 1).saturating_mul(root + 1) <= units {
        root += 1;
    }
    // sqrt(u64::MAX / 100) < u32::MAX
    root as u32
}

/// A player profile: energy, money and progression.
///
/// # Invariants
///
/// - `display_name` is 1-50 characters (enforced by `DisplayName`)
/// - `energy.current() <= energy.max()` (enforced by `Energy`)
/// - money, experience and skill points are never negative (unsigned)
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use netwatch_domain::{DisplayName, Player, PlayerId, UserId};
///
/// let player = Player::create(
///     PlayerId::new(),
///     UserId::new(),
///     DisplayName::new("alice").unwrap(),
///     Utc::now(),
/// );
///
/// assert_eq!(player.level(), 0);
/// assert_eq!(player.energy().max(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlayerRecord", into = "PlayerRecord")]
pub struct Player {
    id: PlayerId,
    user_id: UserId,
    display_name: DisplayName,
    energy: Energy,
    money: Money,
    experience: u64,
    skill_points: u32,
    created_at: DateTime<Utc>,
}

impl Player {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a fresh player: full energy at base capacity, no money,
    /// no experience, no skill points.
    pub fn create(
        id: PlayerId,
        user_id: UserId,
        display_name: DisplayName,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            display_name,
            energy: Energy::full_unchecked(BASE_ENERGY),
            money: Money::zero(),
            experience: 0,
            skill_points: 0,
            created_at: now,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    pub fn energy(&self) -> Energy {
        self.energy
    }

    pub fn money(&self) -> Money {
        self.money
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current level, always derived from experience.
    pub fn level(&self) -> u32 {
        level_for_experience(self.experience)
    }

    pub fn can_afford(&self, cost: Money) -> bool {
        self.money.is_greater_than_or_equal(&cost)
    }

    // =========================================================================
    // Resource operations
    // =========================================================================

    /// # Errors
    ///
    /// Returns `DomainError::InsufficientEnergy` if the pool cannot cover `amount`.
    pub fn consume_energy(&self, amount: u32) -> Result<Self, DomainError> {
        Ok(Self {
            energy: self.energy.consume(amount)?,
            ..self.clone()
        })
    }

    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the balance would exceed 64 bits.
    pub fn earn_money(&self, amount: Money) -> Result<Self, DomainError> {
        Ok(Self {
            money: self.money.add(amount)?,
            ..self.clone()
        })
    }

    /// # Errors
    ///
    /// Returns `DomainError::InsufficientFunds` if `amount` exceeds the balance.
    pub fn spend_money(&self, amount: Money) -> Result<Self, DomainError> {
        Ok(Self {
            money: self.money.subtract(amount)?,
            ..self.clone()
        })
    }

    /// Adds experience. Energy capacity is not touched: it catches up on the
    /// next [`regenerate_energy`](Self::regenerate_energy) or
    /// [`increase_energy_capacity`](Self::increase_energy_capacity).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if experience would exceed 64 bits.
    pub fn gain_experience(&self, amount: u64) -> Result<Self, DomainError> {
        let experience = self
            .experience
            .checked_add(amount)
            .ok_or_else(|| DomainError::overflow("Experience exceeds the representable range"))?;
        Ok(Self {
            experience,
            ..self.clone()
        })
    }

    /// Regenerates energy, then resets capacity to `100 + level * 10`.
    ///
    /// The level is read before regeneration, so the refill is clamped to the
    /// old ceiling before the new ceiling applies. The refill never fills the
    /// newly added headroom in the same call.
    pub fn regenerate_energy(&self, amount: u32) -> Result<Self, DomainError> {
        let level = self.level();
        let energy = self
            .energy
            .regenerate(amount)
            .with_max_capacity(energy_capacity_for_level(level))?;
        Ok(Self {
            energy,
            ..self.clone()
        })
    }

    /// Sets capacity to the ceiling of the next level up, independent of regeneration.
    pub fn increase_energy_capacity(&self) -> Result<Self, DomainError> {
        let next_level = self.level().saturating_add(1);
        let energy = self
            .energy
            .with_max_capacity(energy_capacity_for_level(next_level))?;
        Ok(Self {
            energy,
            ..self.clone()
        })
    }

    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the balance would exceed `u32::MAX`.
    pub fn add_skill_points(&self, amount: u32) -> Result<Self, DomainError> {
        let skill_points = self
            .skill_points
            .checked_add(amount)
            .ok_or_else(|| DomainError::overflow("Skill points exceed the representable range"))?;
        Ok(Self {
            skill_points,
            ..self.clone()
        })
    }

    /// # Errors
    ///
    /// Returns `DomainError::InsufficientSkillPoints` if `amount` exceeds the balance.
    pub fn consume_skill_points(&self, amount: u32) -> Result<Self, DomainError> {
        let skill_points =
            self.skill_points
                .checked_sub(amount)
                .ok_or(DomainError::InsufficientSkillPoints {
                    requested: amount,
                    available: self.skill_points,
                })?;
        Ok(Self {
            skill_points,
            ..self.clone()
        })
    }
}

// ============================================================================
// Storage snapshot
// ============================================================================

/// Flat snapshot of a [`Player`]. Level is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: String,
    pub user_id: String,
    pub display_name: String,
    pub energy: u32,
    pub energy_max: u32,
    pub money: u64,
    pub experience: u64,
    pub skill_points: u32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PlayerRecord> for Player {
    type Error = DomainError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PlayerId::parse(record.id)?,
            user_id: UserId::parse(record.user_id)?,
            display_name: DisplayName::new(record.display_name)?,
            energy: Energy::new(record.energy, record.energy_max)?,
            money: Money::new(record.money),
            experience: record.experience,
            skill_points: record.skill_points,
            created_at: record.created_at,
        })
    }
}

impl From<Player> for PlayerRecord {
    fn from(player: Player) -> Self {
        Self {
            id: player.id.into(),
            user_id: player.user_id.into(),
            display_name: player.display_name.into(),
            energy: player.energy.current(),
            energy_max: player.energy.max(),
            money: player.money.value(),
            experience: player.experience,
            skill_points: player.skill_points,
            created_at: player.created_at,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
