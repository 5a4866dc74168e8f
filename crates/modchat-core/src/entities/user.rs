//! User entity - represents a chat account

use serde::{Deserialize, Serialize};

use crate::entities::UserSettings;
use crate::value_objects::Snowflake;

/// Avatar assigned when an account has not picked one
pub const DEFAULT_AVATAR: &str = "/avatars/default.png";

/// User entity
///
/// Serialized with camelCase keys so the documents match the format the
/// browser clients already persist (`isOnline`, `blockedUsers`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub avatar: String,
    pub is_online: bool,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub blocked_users: Vec<Snowflake>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
}

impl User {
    /// Create a new user with required fields
    pub fn new(id: Snowflake, username: String, avatar: String) -> Self {
        Self {
            id,
            username,
            avatar,
            is_online: false,
            is_admin: false,
            is_approved: false,
            blocked_users: Vec::new(),
            settings: None,
        }
    }

    /// Create an approved account, the shape produced by admin approval
    pub fn approved(id: Snowflake, username: String, avatar: String) -> Self {
        Self {
            is_approved: true,
            ..Self::new(id, username, avatar)
        }
    }

    /// Deterministic placeholder avatar for a fresh registration
    pub fn placeholder_avatar(username: &str) -> String {
        format!("https://i.pravatar.cc/150?u={username}")
    }

    /// Name to show in conversation lists: display name if set, else username
    pub fn display_name(&self) -> &str {
        match &self.settings {
            Some(settings) if !settings.display_name.is_empty() => &settings.display_name,
            _ => &self.username,
        }
    }

    /// Check whether this user has blocked the given peer
    #[inline]
    pub fn has_blocked(&self, peer_id: Snowflake) -> bool {
        self.blocked_users.contains(&peer_id)
    }

    /// Add a peer to the blocked set (idempotent)
    pub fn block(&mut self, peer_id: Snowflake) {
        if !self.blocked_users.contains(&peer_id) {
            self.blocked_users.push(peer_id);
        }
    }

    /// Remove a peer from the blocked set
    pub fn unblock(&mut self, peer_id: Snowflake) {
        self.blocked_users.retain(|id| *id != peer_id);
    }

    /// Replace settings wholesale (last write wins, no merging)
    pub fn replace_settings(&mut self, settings: UserSettings) {
        self.settings = Some(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(Snowflake::new(1), "alice".to_string(), DEFAULT_AVATAR.to_string())
    }

    #[test]
    fn test_block_is_idempotent() {
        let mut user = sample_user();
        user.block(Snowflake::new(7));
        user.block(Snowflake::new(7));
        assert_eq!(user.blocked_users.len(), 1);
        assert!(user.has_blocked(Snowflake::new(7)));

        user.unblock(Snowflake::new(7));
        assert!(!user.has_blocked(Snowflake::new(7)));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = sample_user();
        assert_eq!(user.display_name(), "alice");

        let mut settings = UserSettings::default();
        settings.display_name = "Alice A.".to_string();
        user.replace_settings(settings);
        assert_eq!(user.display_name(), "Alice A.");
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("isOnline").is_some());
        assert!(json.get("blockedUsers").is_some());
        // unset settings are omitted from the document
        assert!(json.get("settings").is_none());
    }

    #[test]
    fn test_approved_constructor() {
        let user = User::approved(Snowflake::new(2), "bob".to_string(), "a.png".to_string());
        assert!(user.is_approved);
        assert!(!user.is_admin);
    }
}
