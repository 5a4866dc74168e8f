//! Conversation entity - a direct or group chat

use serde::{Deserialize, Serialize};

use crate::entities::{Message, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Conversation entity
///
/// Participants are embedded user documents, matching the shape the clients
/// persist. Invariants: direct conversations hold exactly two participants
/// and no group name; groups hold at least two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Snowflake,
    pub participants: Vec<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_avatar: Option<String>,
    #[serde(default)]
    pub typing: bool,
}

impl Conversation {
    /// Create a direct (two-party) conversation
    pub fn direct(id: Snowflake, a: User, b: User) -> Result<Self, DomainError> {
        if a.id == b.id {
            return Err(DomainError::ValidationError(
                "direct conversation requires two distinct users".to_string(),
            ));
        }
        Ok(Self {
            id,
            participants: vec![a, b],
            last_message: None,
            unread_count: 0,
            is_group: false,
            group_name: None,
            group_avatar: None,
            typing: false,
        })
    }

    /// Create a group conversation with a name and at least two participants
    pub fn group(
        id: Snowflake,
        name: String,
        participants: Vec<User>,
    ) -> Result<Self, DomainError> {
        if participants.len() < 2 {
            return Err(DomainError::ValidationError(
                "group conversation requires at least two participants".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "group name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            participants,
            last_message: None,
            unread_count: 0,
            is_group: true,
            group_name: Some(name),
            group_avatar: None,
            typing: false,
        })
    }

    /// Check if this is a two-party, non-group conversation
    #[inline]
    pub fn is_direct(&self) -> bool {
        !self.is_group
    }

    /// Check whether the given user participates
    pub fn includes(&self, user_id: Snowflake) -> bool {
        self.participants.iter().any(|p| p.id == user_id)
    }

    /// Ids of all participants, in insertion order
    pub fn participant_ids(&self) -> Vec<Snowflake> {
        self.participants.iter().map(|p| p.id).collect()
    }

    /// The other party of a direct conversation, from one user's point of view
    pub fn peer_of(&self, user_id: Snowflake) -> Option<&User> {
        if self.is_group {
            return None;
        }
        self.participants.iter().find(|p| p.id != user_id)
    }

    /// Check whether this is the direct conversation between the given pair
    pub fn is_direct_between(&self, a: Snowflake, b: Snowflake) -> bool {
        self.is_direct() && self.includes(a) && self.includes(b)
    }

    /// Record a newly observed message as the latest activity
    pub fn note_message(&mut self, message: Message) {
        self.last_message = Some(message);
    }

    /// Reset the unread counter (owning client marked messages read)
    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }

    /// Remove a participant; returns true if the set changed
    pub fn remove_participant(&mut self, user_id: Snowflake) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != user_id);
        self.participants.len() != before
    }
}
