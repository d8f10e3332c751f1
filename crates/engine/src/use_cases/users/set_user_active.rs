//! Suspend or reactivate an account.

use std::sync::Arc;

use netwatch_domain::{User, UserId};

use crate::infrastructure::ports::UserRepo;

use super::error::UserError;

pub struct SetUserActive {
    user_repo: Arc<dyn UserRepo>,
}

impl SetUserActive {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, active: bool) -> Result<User, UserError> {
        let user = self
            .user_repo
            .get(user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(user_id.clone()))?;

        let user = if active {
            user.activate()
        } else {
            user.suspend()
        };
        self.user_repo.save(&user).await?;

        tracing::info!(user_id = %user_id, active, "Account status changed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockUserRepo;
    use chrono::Utc;
    use netwatch_domain::{PasswordHash, Username};

    #[tokio::test]
    async fn suspends_then_reactivates() {
        let user = User::create(
            UserId::new(),
            Username::new("morpheus").unwrap(),
            PasswordHash::new("h"),
            None,
            Utc::now(),
        );
        let user_id = user.id().clone();

        let mut repo = MockUserRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_save().times(2).returning(|_| Ok(()));
        let use_case = SetUserActive::new(Arc::new(repo));

        assert!(!use_case.execute(&user_id, false).await.unwrap().is_active());
        assert!(use_case.execute(&user_id, true).await.unwrap().is_active());
    }
}
