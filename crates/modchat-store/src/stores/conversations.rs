//! Typed store for the `conversations` collection

use std::sync::Arc;
use tracing::instrument;

use modchat_core::entities::Conversation;
use modchat_core::gateway::{Collection, Gateway, Subscription, WriteOutcome};
use modchat_core::value_objects::Snowflake;

use super::{decode, decode_all, encode, StoreResult};

/// Conversation documents, keyed by conversation id
#[derive(Clone)]
pub struct ConversationStore {
    gateway: Arc<dyn Gateway>,
}

impl ConversationStore {
    /// Create a new ConversationStore
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Insert or fully replace a conversation document
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    pub async fn save(&self, conversation: &Conversation) -> StoreResult<WriteOutcome> {
        let value = encode(conversation)?;
        Ok(self
            .gateway
            .put(Collection::Conversations, &conversation.id.to_string(), value)
            .await?)
    }

    /// Find a conversation by id
    pub async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Conversation>> {
        match self
            .gateway
            .get(Collection::Conversations, &id.to_string())
            .await?
        {
            Some(value) => Ok(Some(decode(value)?)),
            None => Ok(None),
        }
    }

    /// All conversation documents
    pub async fn all(&self) -> StoreResult<Vec<Conversation>> {
        decode_all(self.gateway.list(Collection::Conversations).await?)
    }

    /// Conversations the given user participates in
    pub async fn for_user(&self, user_id: Snowflake) -> StoreResult<Vec<Conversation>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|c| c.includes(user_id))
            .collect())
    }

    /// The direct conversation between two users, if one exists
    pub async fn find_direct_between(
        &self,
        a: Snowflake,
        b: Snowflake,
    ) -> StoreResult<Option<Conversation>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .find(|c| c.is_direct_between(a, b)))
    }

    /// Remove a conversation document
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> StoreResult<()> {
        Ok(self
            .gateway
            .delete(Collection::Conversations, &id.to_string())
            .await?)
    }

    /// Subscribe to conversation document changes
    pub fn watch(&self) -> Subscription {
        self.gateway.subscribe(Collection::Conversations)
    }
}
