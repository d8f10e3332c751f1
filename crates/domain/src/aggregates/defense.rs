//! Defense aggregate - a security module installed on one computer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{ComputerId, DefenseId};

pub const MIN_DEFENSE_LEVEL: u8 = 1;
pub const MAX_DEFENSE_LEVEL: u8 = 5;

const BASE_EFFECTIVENESS: u8 = 20;
const EFFECTIVENESS_PER_LEVEL: u8 = 15;

/// Kind of security software. A computer holds at most one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseType {
    Firewall,
    Antivirus,
    Honeypot,
    Ids,
}

impl DefenseType {
    pub fn all() -> [Self; 4] {
        [Self::Firewall, Self::Antivirus, Self::Honeypot, Self::Ids]
    }
}

impl std::fmt::Display for DefenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefenseType::Firewall => write!(f, "firewall"),
            DefenseType::Antivirus => write!(f, "antivirus"),
            DefenseType::Honeypot => write!(f, "honeypot"),
            DefenseType::Ids => write!(f, "ids"),
        }
    }
}

impl std::str::FromStr for DefenseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "firewall" => Ok(DefenseType::Firewall),
            "antivirus" => Ok(DefenseType::Antivirus),
            "honeypot" => Ok(DefenseType::Honeypot),
            "ids" => Ok(DefenseType::Ids),
            _ => Err(DomainError::parse(format!("Invalid defense type: {}", s))),
        }
    }
}

/// An installed defense with a level in `1..=5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DefenseRecord", into = "DefenseRecord")]
pub struct Defense {
    id: DefenseId,
    computer_id: ComputerId,
    defense_type: DefenseType,
    level: u8,
    installed_at: DateTime<Utc>,
}

impl Defense {
    /// Install a new defense at level 1.
    pub fn create(
        id: DefenseId,
        computer_id: ComputerId,
        defense_type: DefenseType,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            computer_id,
            defense_type,
            level: MIN_DEFENSE_LEVEL,
            installed_at: now,
        }
    }

    pub fn id(&self) -> &DefenseId {
        &self.id
    }

    pub fn computer_id(&self) -> &ComputerId {
        &self.computer_id
    }

    pub fn defense_type(&self) -> DefenseType {
        self.defense_type
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn installed_at(&self) -> DateTime<Utc> {
        self.installed_at
    }

    /// `20 + (level - 1) * 15`, i.e. 20 at level 1 up to 80 at level 5.
    pub fn effectiveness(&self) -> u8 {
        BASE_EFFECTIVENESS + (self.level - MIN_DEFENSE_LEVEL) * EFFECTIVENESS_PER_LEVEL
    }

    pub fn can_upgrade(&self) -> bool {
        self.level < MAX_DEFENSE_LEVEL
    }

    /// Raise the level by exactly one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DefenseAtMaxLevel` if already at level 5.
    pub fn upgrade(&self) -> Result<Self, DomainError> {
        if !self.can_upgrade() {
            return Err(DomainError::DefenseAtMaxLevel {
                max: MAX_DEFENSE_LEVEL,
            });
        }
        Ok(Self {
            level: self.level + 1,
            ..self.clone()
        })
    }
}

/// Flat snapshot of a [`Defense`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefenseRecord {
    pub id: String,
    pub computer_id: String,
    pub defense_type: DefenseType,
    pub level: u8,
    pub installed_at: DateTime<Utc>,
}

impl TryFrom<DefenseRecord> for Defense {
    type Error = DomainError;

    fn try_from(record: DefenseRecord) -> Result<Self, Self::Error> {
        if !(MIN_DEFENSE_LEVEL..=MAX_DEFENSE_LEVEL).contains(&record.level) {
            return Err(DomainError::validation(
                "Defense level must be between 1 and 5",
            ));
        }
        Ok(Self {
            id: DefenseId::parse(record.id)?,
            computer_id: ComputerId::parse(record.computer_id)?,
            defense_type: record.defense_type,
            level: record.level,
            installed_at: record.installed_at,
        })
    }
}

impl From<Defense> for DefenseRecord {
    fn from(defense: Defense) -> Self {
        Self {
            id: defense.id.into(),
            computer_id: defense.computer_id.into(),
            defense_type: defense.defense_type,
            level: defense.level,
            installed_at: defense.installed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_defense() -> Defense {
        Defense::create(
            DefenseId::new(),
            ComputerId::new(),
            DefenseType::Antivirus,
            Utc::now(),
        )
    }

    #[test]
    fn four_upgrades_reach_max_and_fifth_fails() {
        let maxed = create_test_defense()
            .upgrade()
            .and_then(|d| d.upgrade())
            .and_then(|d| d.upgrade())
            .and_then(|d| d.upgrade())
            .unwrap();

        assert_eq!(maxed.level(), 5);
        assert!(!maxed.can_upgrade());
        assert_eq!(
            maxed.upgrade().unwrap_err(),
            DomainError::DefenseAtMaxLevel { max: 5 }
        );
    }

    #[test]
    fn effectiveness_by_level() {
        let mut defense = create_test_defense();
        let mut seen = vec![defense.effectiveness()];
        while defense.can_upgrade() {
            defense = defense.upgrade().unwrap();
            seen.push(defense.effectiveness());
        }
        assert_eq!(seen, vec![20, 35, 50, 65, 80]);
    }

    #[test]
    fn record_validates_level_range() {
        for level in [0, 6] {
            let mut record = DefenseRecord::from(create_test_defense());
            record.level = level;
            assert!(Defense::try_from(record).is_err());
        }
    }

    #[test]
    fn defense_type_parses_case_insensitively() {
        assert_eq!("IDS".parse::<DefenseType>().unwrap(), DefenseType::Ids);
        assert!("moat".parse::<DefenseType>().is_err());
    }
}
