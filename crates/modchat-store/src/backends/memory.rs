//! In-memory gateway implementation

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::broadcast;

use modchat_core::gateway::{
    ChangeEvent, Collection, Gateway, GatewayResult, Subscription, WriteOutcome,
};

use super::EVENT_CAPACITY;

/// Volatile in-memory document store
///
/// The mock-data backend: fast, concurrent, gone on drop. Also the store of
/// choice for tests.
pub struct MemoryStore {
    collections: DashMap<Collection, DashMap<String, Value>>,
    events: broadcast::Sender<ChangeEvent>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            collections: DashMap::new(),
            events,
        }
    }

    /// Number of documents currently held in a collection
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .get(&collection)
            .map_or(0, |c| c.len())
    }

    /// Check if a collection holds no documents
    pub fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection) == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for MemoryStore {
    async fn get(&self, collection: Collection, key: &str) -> GatewayResult<Option<Value>> {
        Ok(self
            .collections
            .get(&collection)
            .and_then(|c| c.get(key).map(|entry| entry.value().clone())))
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        value: Value,
    ) -> GatewayResult<WriteOutcome> {
        self.collections
            .entry(collection)
            .or_default()
            .insert(key.to_string(), value.clone());

        // No receivers is fine; events are best-effort fan-out
        let _ = self.events.send(ChangeEvent::upsert(collection, key, value));
        Ok(WriteOutcome::Primary)
    }

    async fn delete(&self, collection: Collection, key: &str) -> GatewayResult<()> {
        let removed = self
            .collections
            .get(&collection)
            .and_then(|c| c.remove(key))
            .is_some();

        if removed {
            let _ = self.events.send(ChangeEvent::removal(collection, key));
        }
        Ok(())
    }

    async fn list(&self, collection: Collection) -> GatewayResult<Vec<Value>> {
        Ok(self
            .collections
            .get(&collection)
            .map(|c| c.iter().map(|entry| entry.value().clone()).collect())
            .unwrap_or_default())
    }

    fn subscribe(&self, collection: Collection) -> Subscription {
        Subscription::new(collection, self.events.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_put_then_get_roundtrip() {
        let store = MemoryStore::new();
        store
            .put(Collection::Users, "1", json!({"username": "alice"}))
            .await
            .unwrap();

        let value = store.get(Collection::Users, "1").await.unwrap().unwrap();
        assert_eq!(value["username"], "alice");
        assert!(store.get(Collection::Users, "2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_wholesale() {
        let store = MemoryStore::new();
        store
            .put(Collection::Users, "1", json!({"a": 1, "b": 2}))
            .await
            .unwrap();
        store.put(Collection::Users, "1", json!({"a": 9})).await.unwrap();

        let value = store.get(Collection::Users, "1").await.unwrap().unwrap();
        assert_eq!(value, json!({"a": 9}), "last write wins, no merging");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.put(Collection::Users, "1", json!({})).await.unwrap();
        store.delete(Collection::Users, "1").await.unwrap();
        store.delete(Collection::Users, "1").await.unwrap();
        assert!(store.is_empty(Collection::Users));
    }

    #[tokio::test]
    async fn test_subscribers_observe_writes() {
        let store = MemoryStore::new();
        let mut sub = store.subscribe(Collection::Messages);

        store
            .put(Collection::Messages, "5", json!({"content": "hi"}))
            .await
            .unwrap();
        // writes to other collections are filtered out
        store.put(Collection::Users, "1", json!({})).await.unwrap();
        store.delete(Collection::Messages, "5").await.unwrap();

        let event = sub.recv().await.unwrap();
        assert_eq!(event.key, "5");
        assert!(!event.is_removal());

        let event = sub.recv().await.unwrap();
        assert!(event.is_removal());
    }
}
