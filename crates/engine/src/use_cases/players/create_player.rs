//! Create player use case.
//!
//! Every user owns at most one player. The display name starts out as the
//! username.

use std::sync::Arc;

use netwatch_domain::{DisplayName, Player, PlayerId, UserId};

use crate::infrastructure::ports::{ClockPort, PlayerRepo, RandomPort, UserRepo};

use super::error::PlayerError;

pub struct CreatePlayer {
    user_repo: Arc<dyn UserRepo>,
    player_repo: Arc<dyn PlayerRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl CreatePlayer {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        player_repo: Arc<dyn PlayerRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            user_repo,
            player_repo,
            clock,
            random,
        }
    }

    pub async fn execute(&self, user_id: &UserId) -> Result<Player, PlayerError> {
        let user = self
            .user_repo
            .get(user_id)
            .await?
            .ok_or_else(|| PlayerError::UserNotFound(user_id.clone()))?;

        if self.player_repo.get_by_user(user_id).await?.is_some() {
            tracing::warn!(user_id = %user_id, "Player creation rejected: already exists");
            return Err(PlayerError::AlreadyExists(user_id.clone()));
        }

        let player = Player::create(
            PlayerId::from_uuid(self.random.gen_uuid()),
            user_id.clone(),
            DisplayName::new(user.username().as_str())?,
            self.clock.now(),
        );
        self.player_repo.save(&player).await?;

        tracing::info!(player_id = %player.id(), user_id = %user_id, "Player created");
        Ok(player)
    }
}
