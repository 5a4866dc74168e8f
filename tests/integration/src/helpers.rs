//! Test helpers for integration tests
//!
//! Builds service contexts over real gateway backends and provides the
//! common register/approve/login plumbing scenarios need.

use std::sync::Arc;

use anyhow::Result;
use modchat_common::AppConfig;
use modchat_core::entities::User;
use modchat_core::gateway::Gateway;
use modchat_service::{AdminService, AuthService, ServiceContext};
use modchat_store::testing::UnreachableGateway;
use modchat_store::{FallbackGateway, FileStore, MemoryStore};

use crate::fixtures;

/// A fully wired application over a test gateway
pub struct TestApp {
    pub ctx: ServiceContext,
}

impl TestApp {
    /// App over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_gateway(Arc::new(MemoryStore::new()))
    }

    /// App over a file store rooted in the given directory
    pub fn with_data_dir(dir: &std::path::Path) -> Self {
        Self::with_gateway(Arc::new(FileStore::new(dir)))
    }

    /// App whose primary store is unreachable, with an in-memory fallback
    pub fn degraded() -> Self {
        Self::with_gateway(Arc::new(FallbackGateway::new(
            Arc::new(UnreachableGateway::new()),
            Arc::new(MemoryStore::new()),
        )))
    }

    /// App over an arbitrary gateway
    pub fn with_gateway(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            ctx: ServiceContext::new(gateway, &AppConfig::default()),
        }
    }

    /// Sign in as the admin sentinel account
    pub async fn admin(&self) -> Result<User> {
        let session = AuthService::new(&self.ctx)
            .login(fixtures::admin_login())
            .await?;
        Ok(session.user)
    }

    /// Register a username, approve it as admin, and log it in
    ///
    /// Leaves the new account as the signed-in session.
    pub async fn onboard(&self, username: &str) -> Result<User> {
        let auth = AuthService::new(&self.ctx);
        let request = auth.register(fixtures::registration(username)).await?;

        let admin = self.admin().await?;
        AdminService::new(&self.ctx)
            .approve(&admin, request.id)
            .await?;
        auth.logout().await?;

        let session = auth.login(fixtures::login(username)).await?;
        Ok(session.user)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
