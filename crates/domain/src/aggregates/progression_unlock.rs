//! ProgressionUnlock aggregate - a capability granted to a player
//!
//! The aggregate only records the grant. Eligibility (minimum level, funds)
//! and per-player key uniqueness are enforced outside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{PlayerId, ProgressionUnlockId};
use crate::value_objects::UnlockKey;

/// Category of an unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockType {
    Tool,
    Defense,
    Upgrade,
    Skill,
}

impl std::fmt::Display for UnlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnlockType::Tool => write!(f, "tool"),
            UnlockType::Defense => write!(f, "defense"),
            UnlockType::Upgrade => write!(f, "upgrade"),
            UnlockType::Skill => write!(f, "skill"),
        }
    }
}

impl std::str::FromStr for UnlockType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tool" => Ok(UnlockType::Tool),
            "defense" => Ok(UnlockType::Defense),
            "upgrade" => Ok(UnlockType::Upgrade),
            "skill" => Ok(UnlockType::Skill),
            _ => Err(DomainError::parse(format!("Invalid unlock type: {}", s))),
        }
    }
}

/// A granted unlock. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProgressionUnlockRecord", into = "ProgressionUnlockRecord")]
pub struct ProgressionUnlock {
    id: ProgressionUnlockId,
    player_id: PlayerId,
    unlock_type: UnlockType,
    unlock_key: UnlockKey,
    unlocked_at: DateTime<Utc>,
}

impl ProgressionUnlock {
    pub fn create(
        id: ProgressionUnlockId,
        player_id: PlayerId,
        unlock_type: UnlockType,
        unlock_key: UnlockKey,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            player_id,
            unlock_type,
            unlock_key,
            unlocked_at: now,
        }
    }

    pub fn id(&self) -> &ProgressionUnlockId {
        &self.id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn unlock_type(&self) -> UnlockType {
        self.unlock_type
    }

    pub fn unlock_key(&self) -> &UnlockKey {
        &self.unlock_key
    }

    pub fn unlocked_at(&self) -> DateTime<Utc> {
        self.unlocked_at
    }
}

/// Flat snapshot of a [`ProgressionUnlock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionUnlockRecord {
    pub id: String,
    pub player_id: String,
    pub unlock_type: UnlockType,
    pub unlock_key: String,
    pub unlocked_at: DateTime<Utc>,
}

impl TryFrom<ProgressionUnlockRecord> for ProgressionUnlock {
    type Error = DomainError;

    fn try_from(record: ProgressionUnlockRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProgressionUnlockId::parse(record.id)?,
            player_id: PlayerId::parse(record.player_id)?,
            unlock_type: record.unlock_type,
            unlock_key: UnlockKey::new(record.unlock_key)?,
            unlocked_at: record.unlocked_at,
        })
    }
}

impl From<ProgressionUnlock> for ProgressionUnlockRecord {
    fn from(unlock: ProgressionUnlock) -> Self {
        Self {
            id: unlock.id.into(),
            player_id: unlock.player_id.into(),
            unlock_type: unlock.unlock_type,
            unlock_key: unlock.unlock_key.into(),
            unlocked_at: unlock.unlocked_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_stores_grant() {
        let player_id = PlayerId::new();
        let now = Utc::now();
        let unlock = ProgressionUnlock::create(
            ProgressionUnlockId::new(),
            player_id.clone(),
            UnlockType::Tool,
            UnlockKey::new("tool_sqlmap").unwrap(),
            now,
        );

        assert_eq!(unlock.player_id(), &player_id);
        assert_eq!(unlock.unlock_type(), UnlockType::Tool);
        assert_eq!(unlock.unlock_key().as_str(), "tool_sqlmap");
        assert_eq!(unlock.unlocked_at(), now);
    }

    #[test]
    fn record_rejects_empty_key() {
        let record = ProgressionUnlockRecord {
            id: "u-1".into(),
            player_id: "p-1".into(),
            unlock_type: UnlockType::Skill,
            unlock_key: String::new(),
            unlocked_at: Utc::now(),
        };
        assert!(matches!(
            ProgressionUnlock::try_from(record),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn unlock_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&UnlockType::Upgrade).unwrap(),
            "\"upgrade\""
        );
        assert_eq!("SKILL".parse::<UnlockType>().unwrap(), UnlockType::Skill);
    }
}
