//! Authentication service
//!
//! Handles registration (into the admin approval queue), login, logout, and
//! the persisted session.

use modchat_common::AppError;
use modchat_core::entities::{RegistrationRequest, Session, User};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a registration for admin approval
    ///
    /// Creates a pending request only; no account and no session exist until
    /// an admin approves and the user logs in.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegistrationRequest> {
        request.validate()?;

        if request.username == self.ctx.admin().username {
            return Err(ServiceError::conflict("Username already taken"));
        }
        if self
            .ctx
            .users()
            .find_by_username(&request.username)
            .await?
            .is_some()
            || self
                .ctx
                .requests()
                .holder_of_username(&request.username)
                .await?
                .is_some()
        {
            return Err(ServiceError::conflict("Username already taken"));
        }
        if self
            .ctx
            .requests()
            .holder_of_email(&request.email)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let registration =
            RegistrationRequest::new(self.ctx.generate_id(), request.username, request.email);
        self.ctx.requests().save(&registration).await?;

        info!(request_id = %registration.id, "Registration submitted for approval");
        Ok(registration)
    }

    /// Sign in and persist the session
    ///
    /// The admin sentinel account requires its configured password; every
    /// other account signs in by approved username. Pending registrations
    /// get `AccountPending`, everything else `InvalidCredentials`.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<Session> {
        request.validate()?;

        let user = if request.username == self.ctx.admin().username {
            if request.password != self.ctx.admin().password {
                warn!("Login failed: bad admin password");
                return Err(ServiceError::App(AppError::InvalidCredentials));
            }
            self.admin_account().await?
        } else {
            self.approved_account(&request.username).await?
        };

        let session = Session::new(user.clone());
        self.ctx.session().save(&session).await?;

        let mut online = user;
        online.is_online = true;
        self.ctx.users().save(&online).await?;

        info!(user_id = %online.id, "User logged in");
        Ok(session)
    }

    /// Sign out, clearing the persisted session
    ///
    /// Idempotent; signing out without a session is a no-op.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ServiceResult<()> {
        if let Some(session) = self.ctx.session().load().await? {
            if let Some(mut user) = self.ctx.users().find_by_id(session.user.id).await? {
                user.is_online = false;
                self.ctx.users().save(&user).await?;
            }
            info!(user_id = %session.user.id, "User logged out");
        }
        self.ctx.session().clear().await?;
        Ok(())
    }

    /// The persisted session, if someone is signed in
    pub async fn current_session(&self) -> ServiceResult<Option<Session>> {
        Ok(self.ctx.session().load().await?)
    }

    /// The admin account document, created on first login
    async fn admin_account(&self) -> ServiceResult<User> {
        let username = &self.ctx.admin().username;
        if let Some(user) = self.ctx.users().find_by_username(username).await? {
            return Ok(user);
        }

        let mut admin = User::approved(
            self.ctx.generate_id(),
            username.clone(),
            User::placeholder_avatar(username),
        );
        admin.is_admin = true;
        self.ctx.users().save(&admin).await?;
        info!(user_id = %admin.id, "Admin account created");
        Ok(admin)
    }

    /// The account behind an approved registration, created on first login
    async fn approved_account(&self, username: &str) -> ServiceResult<User> {
        if let Some(user) = self.ctx.users().find_by_username(username).await? {
            return Ok(user);
        }

        if self
            .ctx
            .requests()
            .pending_for_username(username)
            .await?
            .is_some()
        {
            return Err(ServiceError::App(AppError::AccountPending));
        }

        let Some(_approved) = self
            .ctx
            .requests()
            .approved_for_username(username)
            .await?
        else {
            warn!("Login failed: no approved registration");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        };

        let user = User::approved(
            self.ctx.generate_id(),
            username.to_string(),
            User::placeholder_avatar(username),
        );
        self.ctx.users().save(&user).await?;
        info!(user_id = %user.id, "Account created from approved registration");
        Ok(user)
    }
}
