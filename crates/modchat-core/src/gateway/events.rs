//! Change notifications delivered to gateway subscribers

use serde_json::Value;
use tokio::sync::broadcast;

use super::port::Collection;

/// A single observed document change
///
/// Deletions carry `Value::Null`. Events reflect whatever order the backing
/// store applied the writes in; there is no replay and no merging.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub key: String,
    pub value: Value,
}

impl ChangeEvent {
    /// Create a change event for an upserted document
    pub fn upsert(collection: Collection, key: impl Into<String>, value: Value) -> Self {
        Self {
            collection,
            key: key.into(),
            value,
        }
    }

    /// Create a change event for a removed document
    pub fn removal(collection: Collection, key: impl Into<String>) -> Self {
        Self {
            collection,
            key: key.into(),
            value: Value::Null,
        }
    }

    /// Check whether this event reports a deletion
    #[inline]
    pub fn is_removal(&self) -> bool {
        self.value.is_null()
    }
}

/// A live subscription to one collection's changes
///
/// Backed by a broadcast channel shared by all subscribers of a store.
/// Slow receivers skip lagged events rather than stalling writers.
pub struct Subscription {
    collection: Collection,
    rx: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// Wrap a raw broadcast receiver, filtering to one collection
    pub fn new(collection: Collection, rx: broadcast::Receiver<ChangeEvent>) -> Self {
        Self { collection, rx }
    }

    /// The collection this subscription observes
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Wait for the next change; `None` once the store is gone
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.collection == self.collection => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, collection = %self.collection, "subscription lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
