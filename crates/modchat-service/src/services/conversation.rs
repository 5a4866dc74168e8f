//! Conversation service
//!
//! Direct and group conversation lifecycle, the sidebar listing with
//! blocked-peer filtering, read state, and the live change feed.

use modchat_core::entities::{Conversation, Message, User};
use modchat_core::gateway::Subscription;
use modchat_core::Snowflake;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::CreateGroupRequest;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a conversation by id
    pub async fn get(&self, conversation_id: Snowflake) -> ServiceResult<Conversation> {
        self.ctx
            .conversations()
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", conversation_id.to_string()))
    }

    /// The viewer's sidebar: their conversations, newest activity first
    ///
    /// Direct conversations with peers the viewer has blocked are hidden,
    /// not deleted; unblocking brings them back untouched.
    pub async fn list_for(&self, viewer_id: Snowflake) -> ServiceResult<Vec<Conversation>> {
        let viewer = self.user(viewer_id).await?;

        let mut conversations: Vec<Conversation> = self
            .ctx
            .conversations()
            .for_user(viewer_id)
            .await?
            .into_iter()
            .filter(|c| match c.peer_of(viewer_id) {
                Some(peer) => !viewer.has_blocked(peer.id),
                None => true,
            })
            .collect();

        conversations.sort_by_key(|c| {
            std::cmp::Reverse(c.last_message.as_ref().map(|m| m.timestamp))
        });
        Ok(conversations)
    }

    /// Open the direct conversation with a peer, creating it on first use
    ///
    /// Idempotent: repeated calls for the same pair return the existing
    /// conversation regardless of argument order.
    #[instrument(skip(self))]
    pub async fn open_direct(
        &self,
        viewer_id: Snowflake,
        peer_id: Snowflake,
    ) -> ServiceResult<Conversation> {
        if let Some(existing) = self
            .ctx
            .conversations()
            .find_direct_between(viewer_id, peer_id)
            .await?
        {
            return Ok(existing);
        }

        let viewer = self.user(viewer_id).await?;
        let peer = self.user(peer_id).await?;

        let conversation = Conversation::direct(self.ctx.generate_id(), viewer, peer)?;
        self.ctx.conversations().save(&conversation).await?;
        info!(conversation_id = %conversation.id, "Direct conversation created");
        Ok(conversation)
    }

    /// Create a named group with the creator plus the requested participants
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_group(
        &self,
        creator_id: Snowflake,
        request: CreateGroupRequest,
    ) -> ServiceResult<Conversation> {
        request.validate()?;

        let mut participants = vec![self.user(creator_id).await?];
        for id in request.participant_ids {
            if id == creator_id || participants.iter().any(|p| p.id == id) {
                continue;
            }
            participants.push(self.user(id).await?);
        }

        let conversation =
            Conversation::group(self.ctx.generate_id(), request.name, participants)?;
        self.ctx.conversations().save(&conversation).await?;
        info!(conversation_id = %conversation.id, "Group conversation created");
        Ok(conversation)
    }

    /// Mark a conversation read from the reader's point of view
    ///
    /// Resets the unread counter and flips the read flag on every message
    /// the reader did not send.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        conversation_id: Snowflake,
        reader_id: Snowflake,
    ) -> ServiceResult<Conversation> {
        let mut conversation = self.get(conversation_id).await?;
        conversation.mark_read();
        if let Some(last) = conversation.last_message.as_mut() {
            if last.sender_id != reader_id {
                last.mark_read();
            }
        }
        self.ctx.conversations().save(&conversation).await?;

        for mut message in self.ctx.messages().for_conversation(conversation_id).await? {
            if !message.is_read && message.sender_id != reader_id {
                message.mark_read();
                self.ctx.messages().save(&message).await?;
            }
        }
        Ok(conversation)
    }

    /// Apply a message observed on the live feed to its conversation
    ///
    /// Records the message as the latest activity and bumps the unread
    /// counter. Callers watching the message feed use this for messages
    /// they did not send; `mark_read` clears the counter again.
    pub async fn note_incoming(&self, message: &Message) -> ServiceResult<Conversation> {
        let mut conversation = self.get(message.conversation_id).await?;
        conversation.note_message(message.clone());
        conversation.unread_count += 1;
        self.ctx.conversations().save(&conversation).await?;
        Ok(conversation)
    }

    /// Remove a user from every conversation they belong to
    ///
    /// Direct conversations are deleted along with their messages. Groups
    /// keep running without the member and without their messages, and
    /// dissolve once fewer than two participants remain.
    #[instrument(skip(self))]
    pub async fn remove_participant_everywhere(&self, user_id: Snowflake) -> ServiceResult<()> {
        for mut conversation in self.ctx.conversations().for_user(user_id).await? {
            conversation.remove_participant(user_id);
            if conversation.is_direct() || conversation.participants.len() < 2 {
                self.ctx
                    .messages()
                    .delete_for_conversation(conversation.id)
                    .await?;
                self.ctx.conversations().delete(conversation.id).await?;
            } else {
                for message in self
                    .ctx
                    .messages()
                    .for_conversation(conversation.id)
                    .await?
                {
                    if message.sender_id == user_id {
                        self.ctx.messages().delete(message.id).await?;
                    }
                }
                if conversation
                    .last_message
                    .as_ref()
                    .is_some_and(|m| m.sender_id == user_id)
                {
                    conversation.last_message = None;
                }
                self.ctx.conversations().save(&conversation).await?;
            }
        }
        Ok(())
    }

    /// Report typing activity in a conversation
    pub async fn typing_started(&self, conversation_id: Snowflake) -> ServiceResult<()> {
        self.ctx.typing().keystroke(conversation_id).await
    }

    /// Clear the typing indicator immediately
    pub async fn typing_stopped(&self, conversation_id: Snowflake) -> ServiceResult<()> {
        self.ctx.typing().stop(conversation_id).await
    }

    /// Subscribe to conversation document changes
    pub fn watch(&self) -> Subscription {
        self.ctx.conversations().watch()
    }

    async fn user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}
