use async_trait::async_trait;

use crate::entities::{StoreSource, TryOnEvent};

/// Minimal capability the durable backend must offer.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Ordered event collection. `load` returns events in insertion order.
#[async_trait]
pub trait EventStore: Send + Sync {
    fn source(&self) -> StoreSource;
    async fn load(&self) -> anyhow::Result<Vec<TryOnEvent>>;
    async fn save(&self, events: &[TryOnEvent]) -> anyhow::Result<()>;
}
