//! Typing indicator timers
//!
//! Each keystroke restarts a per-conversation countdown; when it expires the
//! indicator clears itself. Timer state lives in memory only, the persisted
//! flag is what subscribers observe.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use modchat_core::Snowflake;
use modchat_store::ConversationStore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::error::ServiceResult;

/// Shared typing-indicator state
///
/// Clones share the same timer map, so every service call sees (and
/// restarts) the same countdowns.
#[derive(Clone)]
pub struct TypingNotifier {
    conversations: ConversationStore,
    timeout: Duration,
    timers: Arc<DashMap<Snowflake, JoinHandle<()>>>,
}

impl TypingNotifier {
    /// Create a notifier with the given expiry in milliseconds
    pub fn new(conversations: ConversationStore, timeout_ms: u64) -> Self {
        Self {
            conversations,
            timeout: Duration::from_millis(timeout_ms),
            timers: Arc::new(DashMap::new()),
        }
    }

    /// Report typing activity in a conversation
    ///
    /// Sets the persisted flag and (re)starts the countdown; calling again
    /// before expiry pushes the deadline out, so a steady typist keeps the
    /// indicator lit with exactly one pending timer.
    pub async fn keystroke(&self, conversation_id: Snowflake) -> ServiceResult<()> {
        if let Some((_, previous)) = self.timers.remove(&conversation_id) {
            previous.abort();
        }

        self.set_flag(conversation_id, true).await?;

        let conversations = self.conversations.clone();
        let timers = self.timers.clone();
        let timeout = self.timeout;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            timers.remove(&conversation_id);
            if let Err(err) = clear_flag(&conversations, conversation_id).await {
                warn!(conversation_id = %conversation_id, %err, "failed to clear typing flag");
            }
        });
        self.timers.insert(conversation_id, handle);
        Ok(())
    }

    /// Clear the indicator immediately (message sent, input cleared)
    pub async fn stop(&self, conversation_id: Snowflake) -> ServiceResult<()> {
        if let Some((_, timer)) = self.timers.remove(&conversation_id) {
            timer.abort();
        }
        self.set_flag(conversation_id, false).await
    }

    /// Cancel the countdown without touching the persisted flag
    ///
    /// For callers that clear the flag as part of a larger write, like
    /// sending a message.
    pub fn stop_timer(&self, conversation_id: Snowflake) {
        if let Some((_, timer)) = self.timers.remove(&conversation_id) {
            timer.abort();
        }
    }

    /// Number of conversations with a live countdown
    pub fn active(&self) -> usize {
        self.timers.len()
    }

    async fn set_flag(&self, conversation_id: Snowflake, typing: bool) -> ServiceResult<()> {
        let Some(mut conversation) = self.conversations.find_by_id(conversation_id).await? else {
            debug!(conversation_id = %conversation_id, "typing signal for unknown conversation");
            return Ok(());
        };
        if conversation.typing != typing {
            conversation.typing = typing;
            self.conversations.save(&conversation).await?;
        }
        Ok(())
    }
}

async fn clear_flag(
    conversations: &ConversationStore,
    conversation_id: Snowflake,
) -> ServiceResult<()> {
    if let Some(mut conversation) = conversations.find_by_id(conversation_id).await? {
        if conversation.typing {
            conversation.typing = false;
            conversations.save(&conversation).await?;
        }
    }
    Ok(())
}

impl std::fmt::Debug for TypingNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingNotifier")
            .field("timeout", &self.timeout)
            .field("active", &self.timers.len())
            .finish()
    }
}
