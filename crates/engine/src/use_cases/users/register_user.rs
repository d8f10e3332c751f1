//! Register user use case.

use std::sync::Arc;

use netwatch_domain::{Email, PasswordHash, User, UserId, Username};

use crate::infrastructure::ports::{ClockPort, RandomPort, UserRepo};

use super::error::UserError;

/// Creates an active account.
///
/// The password arrives already hashed; hashing belongs to the transport edge.
pub struct RegisterUser {
    user_repo: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl RegisterUser {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            user_repo,
            clock,
            random,
        }
    }

    pub async fn execute(
        &self,
        username: &str,
        password_hash: PasswordHash,
        email: Option<&str>,
    ) -> Result<User, UserError> {
        let username = Username::new(username)?;
        let email = email.map(Email::new).transpose()?;

        if self.user_repo.username_exists(&username).await? {
            tracing::warn!(username = %username, "Registration rejected: username taken");
            return Err(UserError::UsernameTaken);
        }
        if let Some(email) = &email {
            if self.user_repo.email_exists(email).await? {
                tracing::warn!(username = %username, "Registration rejected: email taken");
                return Err(UserError::EmailTaken);
            }
        }

        let user = User::create(
            UserId::from_uuid(self.random.gen_uuid()),
            username,
            password_hash,
            email,
            self.clock.now(),
        );
        self.user_repo.save(&user).await?;

        tracing::info!(user_id = %user.id(), username = %user.username(), "User registered");
        Ok(user)
    }
}
