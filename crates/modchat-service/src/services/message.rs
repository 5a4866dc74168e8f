//! Message service
//!
//! Sending with delivery feedback, the per-conversation history, and the
//! live message feed.

use modchat_core::entities::Message;
use modchat_core::gateway::{Subscription, WriteOutcome};
use modchat_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{Delivery, SendMessageRequest, SentMessage};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message into a conversation
    ///
    /// Two writes, message then conversation activity, with no transaction
    /// across them. When the primary store is down both land in the local
    /// fallback and the result reports `Delivery::SavedLocally` so the UI
    /// can flag the message instead of dropping it.
    #[instrument(skip(self, request), fields(conversation_id = %request.conversation_id))]
    pub async fn send(
        &self,
        sender_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<SentMessage> {
        request.validate()?;

        let mut conversation = self
            .ctx
            .conversations()
            .find_by_id(request.conversation_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Conversation", request.conversation_id.to_string())
            })?;
        if !conversation.includes(sender_id) {
            return Err(ServiceError::validation(
                "sender is not a participant of this conversation",
            ));
        }

        let mut message = Message::new(
            self.ctx.generate_id(),
            conversation.id,
            sender_id,
            request.content,
            request.kind,
        );
        if let Some(url) = request.media_url {
            message = message.with_media(url);
        }
        if message.is_empty() {
            return Err(ServiceError::validation("message must not be empty"));
        }

        let message_outcome = self.ctx.messages().save(&message).await?;

        // Sending is also an implicit read: the sender has the conversation
        // open, so any badge from earlier incoming messages clears now.
        conversation.note_message(message.clone());
        conversation.mark_read();
        conversation.typing = false;
        let conversation_outcome = self.ctx.conversations().save(&conversation).await?;
        self.ctx.typing().stop_timer(conversation.id);

        let delivery = if message_outcome == WriteOutcome::LocalFallback
            || conversation_outcome == WriteOutcome::LocalFallback
        {
            Delivery::SavedLocally
        } else {
            Delivery::Confirmed
        };

        info!(message_id = %message.id, ?delivery, "Message sent");
        Ok(SentMessage { message, delivery })
    }

    /// The conversation's history, oldest first
    pub async fn history(&self, conversation_id: Snowflake) -> ServiceResult<Vec<Message>> {
        if self
            .ctx
            .conversations()
            .find_by_id(conversation_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found(
                "Conversation",
                conversation_id.to_string(),
            ));
        }
        Ok(self.ctx.messages().for_conversation(conversation_id).await?)
    }

    /// Subscribe to message document changes
    pub fn watch(&self) -> Subscription {
        self.ctx.messages().watch()
    }
}
