//! Typed store for the `session` collection

use std::sync::Arc;
use tracing::instrument;

use modchat_core::entities::Session;
use modchat_core::gateway::{Collection, Gateway, WriteOutcome};

use super::{decode, encode, StoreResult};

/// The collection holds at most one document, the active session
const SESSION_KEY: &str = "current";

/// The single persisted session document
#[derive(Clone)]
pub struct SessionStore {
    gateway: Arc<dyn Gateway>,
}

impl SessionStore {
    /// Create a new SessionStore
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Persist the active session, replacing any previous one
    #[instrument(skip(self, session), fields(session_id = %session.id, user_id = %session.user.id))]
    pub async fn save(&self, session: &Session) -> StoreResult<WriteOutcome> {
        let value = encode(session)?;
        Ok(self
            .gateway
            .put(Collection::Session, SESSION_KEY, value)
            .await?)
    }

    /// Load the active session, if one is persisted
    pub async fn load(&self) -> StoreResult<Option<Session>> {
        match self.gateway.get(Collection::Session, SESSION_KEY).await? {
            Some(value) => Ok(Some(decode(value)?)),
            None => Ok(None),
        }
    }

    /// Drop the active session; a no-op when none is persisted
    #[instrument(skip(self))]
    pub async fn clear(&self) -> StoreResult<()> {
        Ok(self.gateway.delete(Collection::Session, SESSION_KEY).await?)
    }
}
