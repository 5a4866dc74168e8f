//! User settings - per-account preferences, replaced wholesale on save

use serde::{Deserialize, Serialize};

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
}

/// Self-reported availability shown next to the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Away,
    Busy,
    Offline,
}

/// Per-user settings document
///
/// Saved as a single unit: the settings page submits the whole struct and the
/// previous value is fully replaced, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub status: Availability,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
}

fn default_notifications() -> bool {
    true
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            notifications: true,
            language: Language::En,
            status: Availability::Available,
            display_name: String::new(),
            bio: String::new(),
        }
    }
}

impl UserSettings {
    /// Default settings seeded with the account's username as display name
    pub fn for_user(username: &str) -> Self {
        Self {
            display_name: username.to_string(),
            ..Self::default()
        }
    }
}
