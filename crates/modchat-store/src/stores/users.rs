//! Typed store for the `users` collection

use std::sync::Arc;
use tracing::instrument;

use modchat_core::entities::User;
use modchat_core::gateway::{Collection, Gateway, Subscription, WriteOutcome};
use modchat_core::value_objects::Snowflake;

use super::{decode, decode_all, encode, StoreResult};

/// User documents, keyed by user id
#[derive(Clone)]
pub struct UserStore {
    gateway: Arc<dyn Gateway>,
}

impl UserStore {
    /// Create a new UserStore
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Insert or fully replace a user document (last write wins)
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn save(&self, user: &User) -> StoreResult<WriteOutcome> {
        let value = encode(user)?;
        Ok(self
            .gateway
            .put(Collection::Users, &user.id.to_string(), value)
            .await?)
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<User>> {
        match self.gateway.get(Collection::Users, &id.to_string()).await? {
            Some(value) => Ok(Some(decode(value)?)),
            None => Ok(None),
        }
    }

    /// Find a user by exact username
    pub async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|user| user.username == username))
    }

    /// All user documents
    pub async fn list(&self) -> StoreResult<Vec<User>> {
        decode_all(self.gateway.list(Collection::Users).await?)
    }

    /// Remove a user document
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> StoreResult<()> {
        Ok(self
            .gateway
            .delete(Collection::Users, &id.to_string())
            .await?)
    }

    /// Subscribe to user document changes
    pub fn watch(&self) -> Subscription {
        self.gateway.subscribe(Collection::Users)
    }
}
