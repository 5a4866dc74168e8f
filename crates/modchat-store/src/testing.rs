//! Test doubles for the gateway port

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use modchat_core::gateway::{
    ChangeEvent, Collection, Gateway, GatewayError, GatewayResult, Subscription, WriteOutcome,
};

/// A gateway whose backing store is permanently unreachable
///
/// Stands in for a remote document store that cannot be contacted; used to
/// exercise the fallback path in unit and integration tests.
pub struct UnreachableGateway {
    events: broadcast::Sender<ChangeEvent>,
}

impl UnreachableGateway {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(1);
        Self { events }
    }

    fn unavailable() -> GatewayError {
        GatewayError::Unavailable("store unreachable".to_string())
    }
}

impl Default for UnreachableGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for UnreachableGateway {
    async fn get(&self, _collection: Collection, _key: &str) -> GatewayResult<Option<Value>> {
        Err(Self::unavailable())
    }

    async fn put(
        &self,
        _collection: Collection,
        _key: &str,
        _value: Value,
    ) -> GatewayResult<WriteOutcome> {
        Err(Self::unavailable())
    }

    async fn delete(&self, _collection: Collection, _key: &str) -> GatewayResult<()> {
        Err(Self::unavailable())
    }

    async fn list(&self, _collection: Collection) -> GatewayResult<Vec<Value>> {
        Err(Self::unavailable())
    }

    fn subscribe(&self, collection: Collection) -> Subscription {
        // Never delivers anything; ends when the double is dropped
        Subscription::new(collection, self.events.subscribe())
    }
}
