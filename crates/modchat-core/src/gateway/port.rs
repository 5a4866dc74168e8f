//! The gateway trait and its supporting types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::events::Subscription;

/// Record collections addressable through the gateway
///
/// Keys within a collection are the entity's `id` rendered as a string, with
/// the exception of `session`, which holds a single document under a
/// well-known key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Messages,
    Conversations,
    RegistrationRequests,
    Session,
}

impl Collection {
    /// All collections, in storage order
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Messages,
        Collection::Conversations,
        Collection::RegistrationRequests,
        Collection::Session,
    ];

    /// The collection's storage name (file stem, localStorage key)
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Messages => "messages",
            Self::Conversations => "conversations",
            Self::RegistrationRequests => "registration_requests",
            Self::Session => "session",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a write finally landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The primary store accepted the write
    Primary,
    /// The primary store was unreachable; the local fallback holds the write
    LocalFallback,
}

impl WriteOutcome {
    /// Check whether the write degraded to the fallback store
    #[inline]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::LocalFallback)
    }
}

/// Gateway-level errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Uniform get/put/subscribe interface over a key-value document store
///
/// No transaction guarantee spans multiple calls: callers must treat every
/// operation as independently fallible. Concurrent writers to the same key
/// follow last-write-wins.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch a single document, or `None` when absent
    async fn get(&self, collection: Collection, key: &str) -> GatewayResult<Option<Value>>;

    /// Insert or fully replace a document
    async fn put(&self, collection: Collection, key: &str, value: Value)
        -> GatewayResult<WriteOutcome>;

    /// Remove a document; removing an absent key is not an error
    async fn delete(&self, collection: Collection, key: &str) -> GatewayResult<()>;

    /// All documents of a collection, in unspecified order
    async fn list(&self, collection: Collection) -> GatewayResult<Vec<Value>>;

    /// Subscribe to changes of one collection
    ///
    /// Dropping the returned subscription unsubscribes. Deletions are
    /// delivered with a `null` value.
    fn subscribe(&self, collection: Collection) -> Subscription;
}
