//! User aggregate - account identity, independent of game state
//!
//! Players reference a user by id only; there is no back-pointer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::UserId;
use crate::value_objects::{Email, PasswordHash, Username};

/// An account record owned by the identity subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord", into = "UserRecord")]
pub struct User {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
    email: Option<Email>,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Register a new, active account that has never logged in.
    pub fn create(
        id: UserId,
        username: Username,
        password_hash: PasswordHash,
        email: Option<Email>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            email,
            is_active: true,
            created_at: now,
            last_login_at: None,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Stamp a successful login.
    pub fn record_login(&self, now: DateTime<Utc>) -> Self {
        Self {
            last_login_at: Some(now),
            ..self.clone()
        }
    }

    pub fn suspend(&self) -> Self {
        Self {
            is_active: false,
            ..self.clone()
        }
    }

    pub fn activate(&self) -> Self {
        Self {
            is_active: true,
            ..self.clone()
        }
    }
}

/// Flat snapshot of a [`User`] for persistence collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::parse(record.id)?,
            username: Username::new(record.username)?,
            password_hash: PasswordHash::new(record.password_hash),
            email: record.email.map(Email::new).transpose()?,
            is_active: record.is_active,
            created_at: record.created_at,
            last_login_at: record.last_login_at,
        })
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: user.username.into(),
            password_hash: user.password_hash.as_str().to_string(),
            email: user.email.map(String::from),
            is_active: user.is_active,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}
