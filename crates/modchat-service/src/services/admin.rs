//! Admin service
//!
//! Registration approval queue and account removal. Every operation checks
//! the acting user's admin flag; a non-admin caller gets a logged no-op
//! rather than an error, matching how the UI hides these controls.

use modchat_core::entities::{RegistrationRequest, User};
use modchat_core::Snowflake;
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::conversation::ConversationService;
use super::error::{ServiceError, ServiceResult};

/// Admin service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Unresolved registration requests, oldest first
    ///
    /// Empty for non-admin callers.
    pub async fn pending_requests(
        &self,
        actor: &User,
    ) -> ServiceResult<Vec<RegistrationRequest>> {
        if !self.is_admin(actor, "pending_requests") {
            return Ok(Vec::new());
        }
        Ok(self.ctx.requests().pending().await?)
    }

    /// Approve a pending registration
    ///
    /// Returns the freshly created account, or `None` when the caller is not
    /// an admin.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn approve(
        &self,
        actor: &User,
        request_id: Snowflake,
    ) -> ServiceResult<Option<User>> {
        if !self.is_admin(actor, "approve") {
            return Ok(None);
        }

        let mut request = self.request(request_id).await?;
        request.approve()?;
        self.ctx.requests().save(&request).await?;

        let user = User::approved(
            self.ctx.generate_id(),
            request.username.clone(),
            User::placeholder_avatar(&request.username),
        );
        self.ctx.users().save(&user).await?;

        info!(request_id = %request_id, user_id = %user.id, "Registration approved");
        Ok(Some(user))
    }

    /// Reject a pending registration
    ///
    /// The request stays on record as rejected; the username and email
    /// become available again.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn reject(&self, actor: &User, request_id: Snowflake) -> ServiceResult<()> {
        if !self.is_admin(actor, "reject") {
            return Ok(());
        }

        let mut request = self.request(request_id).await?;
        request.reject()?;
        self.ctx.requests().save(&request).await?;

        info!(request_id = %request_id, "Registration rejected");
        Ok(())
    }

    /// Delete an account and everything that references it
    ///
    /// Cascade: the user's messages go, direct conversations go entirely,
    /// groups lose the member (and dissolve below two participants), other
    /// users' block lists drop the id, and a live session for the account is
    /// ended.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn delete_user(&self, actor: &User, user_id: Snowflake) -> ServiceResult<()> {
        if !self.is_admin(actor, "delete_user") {
            return Ok(());
        }
        if user_id == actor.id {
            return Err(ServiceError::validation("admins cannot delete themselves"));
        }
        if self.ctx.users().find_by_id(user_id).await?.is_none() {
            return Err(ServiceError::not_found("User", user_id.to_string()));
        }

        ConversationService::new(self.ctx)
            .remove_participant_everywhere(user_id)
            .await?;

        for mut other in self.ctx.users().list().await? {
            if other.has_blocked(user_id) {
                other.unblock(user_id);
                self.ctx.users().save(&other).await?;
            }
        }

        if let Some(session) = self.ctx.session().load().await? {
            if session.user.id == user_id {
                self.ctx.session().clear().await?;
            }
        }

        self.ctx.users().delete(user_id).await?;
        info!(user_id = %user_id, "User deleted");
        Ok(())
    }

    fn is_admin(&self, actor: &User, operation: &str) -> bool {
        if actor.is_admin {
            return true;
        }
        warn!(actor_id = %actor.id, operation, "Admin operation attempted by non-admin");
        false
    }

    async fn request(&self, request_id: Snowflake) -> ServiceResult<RegistrationRequest> {
        self.ctx
            .requests()
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Registration request", request_id.to_string()))
    }
}
