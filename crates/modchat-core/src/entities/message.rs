//! Message entity - a single chat message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Payload kind carried by a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Video,
    File,
}

impl MessageKind {
    /// Check if this kind carries a media URL
    #[inline]
    pub fn is_media(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Message entity
///
/// Immutable once created except for the `is_read` flip. Timestamps are
/// stored as millisecond integers to match the existing documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl Message {
    /// Create a new unread message timestamped now
    pub fn new(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        content: String,
        kind: MessageKind,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            content,
            timestamp: Utc::now(),
            is_read: false,
            kind,
            media_url: None,
        }
    }

    /// Attach a media URL (image/video/file messages)
    #[must_use]
    pub fn with_media(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }

    /// Flip the read flag, the only permitted mutation
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// Get a truncated preview of the message (for conversation lists)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.media_url.is_none()
    }
}
