//! File-backed gateway implementation

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;
use tracing::debug;

use modchat_core::gateway::{
    ChangeEvent, Collection, Gateway, GatewayError, GatewayResult, Subscription, WriteOutcome,
};

use super::EVENT_CAPACITY;

/// File-backed document store, one JSON file per collection
///
/// The localStorage analog: each collection is persisted wholesale as a JSON
/// object keyed by document id, rewritten on every mutation. Collections are
/// loaded lazily on first access.
pub struct FileStore {
    dir: PathBuf,
    inner: Mutex<Inner>,
    // Held across snapshot and write so snapshots reach disk in the order
    // they were taken; without it a stale snapshot can land after a newer one.
    flush_gate: tokio::sync::Mutex<()>,
    events: broadcast::Sender<ChangeEvent>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<Collection, HashMap<String, Value>>,
    loaded: HashSet<Collection>,
}

impl FileStore {
    /// Open a store rooted at the given directory (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            dir: dir.into(),
            inner: Mutex::new(Inner::default()),
            flush_gate: tokio::sync::Mutex::new(()),
            events,
        }
    }

    /// The directory holding the collection files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }

    /// Load a collection from disk if this is its first access.
    ///
    /// The file may legitimately be absent (nothing written yet).
    async fn ensure_loaded(&self, collection: Collection) -> GatewayResult<()> {
        if self.inner.lock().loaded.contains(&collection) {
            return Ok(());
        }

        let documents = match tokio::fs::read(self.path(collection)).await {
            Ok(bytes) => serde_json::from_slice::<HashMap<String, Value>>(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(GatewayError::from(err)),
        };

        debug!(collection = %collection, count = documents.len(), "collection loaded");

        let mut inner = self.inner.lock();
        // A concurrent loader may have won the race; keep its result
        if inner.loaded.insert(collection) {
            inner.collections.insert(collection, documents);
        }
        Ok(())
    }

    /// Persist a collection's current documents to its file
    ///
    /// Flushes are serialized through `flush_gate`; the in-memory mutex is
    /// still never held across an await point.
    async fn flush(&self, collection: Collection) -> GatewayResult<()> {
        let _gate = self.flush_gate.lock().await;

        let serialized = {
            let inner = self.inner.lock();
            let documents = inner.collections.get(&collection);
            serde_json::to_vec_pretty(&documents.cloned().unwrap_or_default())?
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path(collection), serialized).await?;
        Ok(())
    }
}

#[async_trait]
impl Gateway for FileStore {
    async fn get(&self, collection: Collection, key: &str) -> GatewayResult<Option<Value>> {
        self.ensure_loaded(collection).await?;
        Ok(self
            .inner
            .lock()
            .collections
            .get(&collection)
            .and_then(|c| c.get(key).cloned()))
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        value: Value,
    ) -> GatewayResult<WriteOutcome> {
        self.ensure_loaded(collection).await?;
        self.inner
            .lock()
            .collections
            .entry(collection)
            .or_default()
            .insert(key.to_string(), value.clone());

        self.flush(collection).await?;
        let _ = self.events.send(ChangeEvent::upsert(collection, key, value));
        Ok(WriteOutcome::Primary)
    }

    async fn delete(&self, collection: Collection, key: &str) -> GatewayResult<()> {
        self.ensure_loaded(collection).await?;
        let removed = self
            .inner
            .lock()
            .collections
            .get_mut(&collection)
            .and_then(|c| c.remove(key))
            .is_some();

        if removed {
            self.flush(collection).await?;
            let _ = self.events.send(ChangeEvent::removal(collection, key));
        }
        Ok(())
    }

    async fn list(&self, collection: Collection) -> GatewayResult<Vec<Value>> {
        self.ensure_loaded(collection).await?;
        Ok(self
            .inner
            .lock()
            .collections
            .get(&collection)
            .map(|c| c.values().cloned().collect())
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
    async fn test_documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStore::new(dir.path());
        store
            .put(Collection::Users, "1", json!({"username": "alice"}))
            .await
            .unwrap();
        drop(store);

        let reopened = FileStore::new(dir.path());
        let value = reopened.get(Collection::Users, "1").await.unwrap().unwrap();
        assert_eq!(value["username"], "alice");
    }

    #[tokio::test]
    async fn test_absent_collection_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.list(Collection::Messages).await.unwrap().is_empty());
        assert!(store.get(Collection::Users, "9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.put(Collection::Users, "1", json!({})).await.unwrap();
        store.delete(Collection::Users, "1").await.unwrap();
        drop(store);

        let reopened = FileStore::new(dir.path());
        assert!(reopened.get(Collection::Users, "1").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_all_reach_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileStore::new(dir.path()));

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .put(Collection::Users, &i.to_string(), json!({"n": i}))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        drop(store);

        // every write must be visible in the final on-disk snapshot
        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.list(Collection::Users).await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_collections_use_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.put(Collection::Users, "1", json!({})).await.unwrap();
        store.put(Collection::Messages, "2", json!({})).await.unwrap();

        assert!(dir.path().join("users.json").exists());
        assert!(dir.path().join("messages.json").exists());
    }
}
