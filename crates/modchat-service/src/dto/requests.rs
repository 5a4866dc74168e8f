//! Request DTOs for service operations
//!
//! All request DTOs implement `Deserialize` and, where they carry free-form
//! input, `Validate`.

use serde::Deserialize;
use validator::Validate;

use modchat_core::{MessageKind, Snowflake};

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request; lands in the admin approval queue
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Login request
///
/// Only the admin sentinel account carries a password; everyone else signs
/// in by approved username alone, so the field defaults to empty.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Conversation Requests
// ============================================================================

/// Create group conversation request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Group name must be 1-100 characters"))]
    pub name: String,

    /// Participants besides the creator
    #[validate(length(min = 1, message = "A group needs at least one other participant"))]
    pub participant_ids: Vec<Snowflake>,
}

// ============================================================================
// Message Requests
// ============================================================================

/// Send message request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub conversation_id: Snowflake,

    #[validate(length(max = 4000, message = "Message must be at most 4000 characters"))]
    pub content: String,

    #[serde(rename = "type", default = "default_kind")]
    pub kind: MessageKind,

    #[serde(default)]
    pub media_url: Option<String>,
}

fn default_kind() -> MessageKind {
    MessageKind::Text
}

impl SendMessageRequest {
    /// Plain text message
    pub fn text(conversation_id: Snowflake, content: impl Into<String>) -> Self {
        Self {
            conversation_id,
            content: content.into(),
            kind: MessageKind::Text,
            media_url: None,
        }
    }

    /// Image message with an optional caption
    pub fn image(
        conversation_id: Snowflake,
        url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id,
            content: caption.into(),
            kind: MessageKind::Image,
            media_url: Some(url.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "a".to_string(),
            email: "not-an-email".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("email"));

        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_password_defaults_to_empty() {
        let request: LoginRequest = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(request.password, "");
    }

    #[test]
    fn test_send_message_kind_defaults_to_text() {
        let request: SendMessageRequest =
            serde_json::from_str(r#"{"conversationId": "12", "content": "hi"}"#).unwrap();
        assert_eq!(request.kind, MessageKind::Text);
        assert!(request.media_url.is_none());
    }
}
