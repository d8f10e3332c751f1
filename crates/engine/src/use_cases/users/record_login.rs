//! Record login use case.

use std::sync::Arc;

use netwatch_domain::{User, UserId};

use crate::infrastructure::ports::{ClockPort, UserRepo};

use super::error::UserError;

/// Stamps `last_login_at`. Suspended accounts are turned away.
pub struct RecordLogin {
    user_repo: Arc<dyn UserRepo>,
    clock: Arc<dyn ClockPort>,
}

impl RecordLogin {
    pub fn new(user_repo: Arc<dyn UserRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { user_repo, clock }
    }

    pub async fn execute(&self, user_id: &UserId) -> Result<User, UserError> {
        let user = self
            .user_repo
            .get(user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(user_id.clone()))?;

        if !user.is_active() {
            tracing::warn!(user_id = %user_id, "Login rejected: account suspended");
            return Err(UserError::Suspended(user_id.clone()));
        }

        let user = user.record_login(self.clock.now());
        self.user_repo.save(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockClockPort, MockUserRepo};
    use chrono::{Duration, Utc};
    use netwatch_domain::{PasswordHash, Username};

    fn stored_user(active: bool) -> User {
        let user = User::create(
            UserId::new(),
            Username::new("trinity").unwrap(),
            PasswordHash::new("h"),
            None,
            Utc::now() - Duration::days(1),
        );
        if active {
            user
        } else {
            user.suspend()
        }
    }

    #[tokio::test]
    async fn stamps_login_time() {
        let user = stored_user(true);
        let user_id = user.id().clone();
        let now = Utc::now();

        let mut repo = MockUserRepo::new();
        let stored = user.clone();
        repo.expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_save()
            .withf(move |u| u.last_login_at() == Some(now))
            .times(1)
            .returning(|_| Ok(()));
        let mut clock = MockClockPort::new();
        clock.expect_now().return_const(now);

        let updated = RecordLogin::new(Arc::new(repo), Arc::new(clock))
            .execute(&user_id)
            .await
            .unwrap();

        assert_eq!(updated.last_login_at(), Some(now));
    }

    #[tokio::test]
    async fn when_suspended_returns_error() {
        let user = stored_user(false);
        let user_id = user.id().clone();

        let mut repo = MockUserRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_save().never();

        let result = RecordLogin::new(Arc::new(repo), Arc::new(MockClockPort::new()))
            .execute(&user_id)
            .await;

        assert!(matches!(result, Err(UserError::Suspended(_))));
    }

    #[tokio::test]
    async fn when_user_missing_returns_not_found() {
        let mut repo = MockUserRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let result = RecordLogin::new(Arc::new(repo), Arc::new(MockClockPort::new()))
            .execute(&UserId::new())
            .await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
