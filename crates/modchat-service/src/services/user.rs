//! User service
//!
//! Profile reads, settings replacement, avatar changes, presence, and the
//! block list.

use modchat_core::entities::{User, UserSettings};
use modchat_core::Snowflake;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a user by id
    pub async fn get(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// All known users
    pub async fn list(&self) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.users().list().await?)
    }

    /// Everyone except the given user, for the "start a conversation" picker
    pub async fn peers_of(&self, user_id: Snowflake) -> ServiceResult<Vec<User>> {
        Ok(self
            .ctx
            .users()
            .list()
            .await?
            .into_iter()
            .filter(|u| u.id != user_id)
            .collect())
    }

    /// Replace a user's settings wholesale (no per-field merging)
    #[instrument(skip(self, settings))]
    pub async fn update_settings(
        &self,
        user_id: Snowflake,
        settings: UserSettings,
    ) -> ServiceResult<User> {
        let mut user = self.get(user_id).await?;
        user.replace_settings(settings);
        self.persist(user).await
    }

    /// Set an explicit avatar URL
    #[instrument(skip(self, url))]
    pub async fn set_avatar(&self, user_id: Snowflake, url: String) -> ServiceResult<User> {
        let mut user = self.get(user_id).await?;
        user.avatar = url;
        self.persist(user).await
    }

    /// Shuffle to a fresh random placeholder avatar
    #[instrument(skip(self))]
    pub async fn randomize_avatar(&self, user_id: Snowflake) -> ServiceResult<User> {
        let mut user = self.get(user_id).await?;
        let seed: u32 = rand::random();
        user.avatar = format!("https://i.pravatar.cc/150?u={seed}");
        self.persist(user).await
    }

    /// Update the presence flag
    #[instrument(skip(self))]
    pub async fn set_online(&self, user_id: Snowflake, online: bool) -> ServiceResult<User> {
        let mut user = self.get(user_id).await?;
        user.is_online = online;
        self.persist(user).await
    }

    /// Block a peer (idempotent)
    #[instrument(skip(self))]
    pub async fn block(&self, user_id: Snowflake, peer_id: Snowflake) -> ServiceResult<User> {
        if user_id == peer_id {
            return Err(ServiceError::validation("cannot block yourself"));
        }
        // verify the peer exists before recording the id
        self.get(peer_id).await?;

        let mut user = self.get(user_id).await?;
        user.block(peer_id);
        info!(user_id = %user_id, peer_id = %peer_id, "User blocked");
        self.persist(user).await
    }

    /// Unblock a peer; a no-op when they were not blocked
    #[instrument(skip(self))]
    pub async fn unblock(&self, user_id: Snowflake, peer_id: Snowflake) -> ServiceResult<User> {
        let mut user = self.get(user_id).await?;
        user.unblock(peer_id);
        self.persist(user).await
    }

    /// Save the user and refresh the embedded copy in the session, if it is
    /// the signed-in user
    async fn persist(&self, user: User) -> ServiceResult<User> {
        self.ctx.users().save(&user).await?;

        if let Some(mut session) = self.ctx.session().load().await? {
            if session.user.id == user.id {
                session.user = user.clone();
                self.ctx.session().save(&session).await?;
            }
        }
        Ok(user)
    }
}
