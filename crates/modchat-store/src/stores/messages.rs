//! Typed store for the `messages` collection

use std::sync::Arc;
use tracing::instrument;

use modchat_core::entities::Message;
use modchat_core::gateway::{Collection, Gateway, Subscription, WriteOutcome};
use modchat_core::value_objects::Snowflake;

use super::{decode_all, encode, StoreResult};

/// Message documents, keyed by message id
///
/// Messages are append-mostly: after the initial write the only update is
/// the read flag, which goes through `save` again.
#[derive(Clone)]
pub struct MessageStore {
    gateway: Arc<dyn Gateway>,
}

impl MessageStore {
    /// Create a new MessageStore
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Insert or replace a message document
    #[instrument(skip(self, message), fields(message_id = %message.id, conversation_id = %message.conversation_id))]
    pub async fn save(&self, message: &Message) -> StoreResult<WriteOutcome> {
        let value = encode(message)?;
        Ok(self
            .gateway
            .put(Collection::Messages, &message.id.to_string(), value)
            .await?)
    }

    /// All messages of one conversation, oldest first
    ///
    /// Ordered by timestamp with the id as tiebreak, so two messages created
    /// within the same millisecond still come back in send order.
    pub async fn for_conversation(&self, conversation_id: Snowflake) -> StoreResult<Vec<Message>> {
        let mut messages: Vec<Message> = decode_all(self.gateway.list(Collection::Messages).await?)?
            .into_iter()
            .filter(|m: &Message| m.conversation_id == conversation_id)
            .collect();
        messages.sort_by_key(|m| (m.timestamp, m.id));
        Ok(messages)
    }

    /// Remove a single message document
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> StoreResult<()> {
        Ok(self
            .gateway
            .delete(Collection::Messages, &id.to_string())
            .await?)
    }

    /// Remove every message of one conversation
    #[instrument(skip(self))]
    pub async fn delete_for_conversation(&self, conversation_id: Snowflake) -> StoreResult<()> {
        for message in self.for_conversation(conversation_id).await? {
            self.gateway
                .delete(Collection::Messages, &message.id.to_string())
                .await?;
        }
        Ok(())
    }

    /// Subscribe to message document changes
    pub fn watch(&self) -> Subscription {
        self.gateway.subscribe(Collection::Messages)
    }
}
