//! Primary store with transparent local fallback

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

use modchat_core::gateway::{
    ChangeEvent, Collection, Gateway, GatewayResult, Subscription, WriteOutcome,
};

use super::EVENT_CAPACITY;

/// A primary gateway backed by a local fallback store
///
/// Every operation is tried against the primary first; on failure it is
/// retried once against the fallback and the fallback result is returned.
/// Writes that degrade report `WriteOutcome::LocalFallback` so callers can
/// surface a "saved locally" state. The two stores are never reconciled:
/// there is no transaction spanning both and no replay of degraded writes.
///
/// Change events from both stores are forwarded to subscribers of the
/// composite, in whatever order they arrive.
pub struct FallbackGateway {
    primary: Arc<dyn Gateway>,
    fallback: Arc<dyn Gateway>,
    events: broadcast::Sender<ChangeEvent>,
}

impl FallbackGateway {
    /// Combine a primary store with a local fallback.
    ///
    /// Must be called within a tokio runtime; event forwarding runs on
    /// background tasks that end when the stores are dropped.
    pub fn new(primary: Arc<dyn Gateway>, fallback: Arc<dyn Gateway>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        for collection in Collection::ALL {
            Self::forward(primary.subscribe(collection), events.clone());
            Self::forward(fallback.subscribe(collection), events.clone());
        }

        Self {
            primary,
            fallback,
            events,
        }
    }

    fn forward(mut source: Subscription, sink: broadcast::Sender<ChangeEvent>) {
        tokio::spawn(async move {
            while let Some(event) = source.recv().await {
                let _ = sink.send(event);
            }
        });
    }
}

#[async_trait]
impl Gateway for FallbackGateway {
    async fn get(&self, collection: Collection, key: &str) -> GatewayResult<Option<Value>> {
        match self.primary.get(collection, key).await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(collection = %collection, key, %err, "primary read failed, using fallback");
                self.fallback.get(collection, key).await
            }
        }
    }

    async fn put(
        &self,
        collection: Collection,
        key: &str,
        value: Value,
    ) -> GatewayResult<WriteOutcome> {
        match self.primary.put(collection, key, value.clone()).await {
            Ok(_) => Ok(WriteOutcome::Primary),
            Err(err) => {
                warn!(collection = %collection, key, %err, "primary write failed, using fallback");
                self.fallback.put(collection, key, value).await?;
                Ok(WriteOutcome::LocalFallback)
            }
        }
    }

    async fn delete(&self, collection: Collection, key: &str) -> GatewayResult<()> {
        match self.primary.delete(collection, key).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(collection = %collection, key, %err, "primary delete failed, using fallback");
                self.fallback.delete(collection, key).await
            }
        }
    }

    async fn list(&self, collection: Collection) -> GatewayResult<Vec<Value>> {
        match self.primary.list(collection).await {
            Ok(values) => Ok(values),
            Err(err) => {
                warn!(collection = %collection, %err, "primary list failed, using fallback");
                self.fallback.list(collection).await
            }
        }
    }

    fn subscribe(&self, collection: Collection) -> Subscription {
        Subscription::new(collection, self.events.subscribe())
    }
}
