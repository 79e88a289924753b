use std::sync::Arc;

use tracing::warn;

use backend_domain::{BackendConnector, EventStore, StoreSource, TryOnEvent};

use crate::stores::{KvEventStore, MemoryEventStore};

/// Chooses between the durable collection and the process-local fallback.
/// The choice is made per call; nothing sticks between calls.
pub struct EventStores {
    connector: Option<Arc<dyn BackendConnector>>,
    fallback: Arc<MemoryEventStore>,
    events_key: String,
}

impl EventStores {
    pub fn new(
        connector: Arc<dyn BackendConnector>,
        fallback: Arc<MemoryEventStore>,
        events_key: impl Into<String>,
    ) -> Self {
        Self {
            connector: Some(connector),
            fallback,
            events_key: events_key.into(),
        }
    }

    pub fn fallback_only(fallback: Arc<MemoryEventStore>) -> Self {
        Self {
            connector: None,
            fallback,
            events_key: backend_domain::DEFAULT_EVENTS_KEY.to_string(),
        }
    }

    pub fn durable_configured(&self) -> bool {
        self.connector
            .as_ref()
            .map(|connector| connector.is_configured())
            .unwrap_or(false)
    }

    /// Durable store for this call, if the backend is usable right now.
    pub async fn durable(&self) -> Option<KvEventStore> {
        let connector = self.connector.as_ref()?;
        let kv = connector.acquire().await?;
        Some(KvEventStore::new(kv, self.events_key.clone()))
    }

    pub async fn invalidate(&self) {
        if let Some(connector) = &self.connector {
            connector.invalidate().await;
        }
    }

    pub fn fallback(&self) -> Arc<MemoryEventStore> {
        self.fallback.clone()
    }

    /// Point-in-time copy of the collection, durable first.
    pub async fn snapshot(&self) -> anyhow::Result<(StoreSource, Vec<TryOnEvent>)> {
        if let Some(store) = self.durable().await {
            match store.load().await {
                Ok(events) => return Ok((StoreSource::Durable, events)),
                Err(err) => {
                    warn!("durable read failed, serving fallback collection: {:#}", err);
                    self.invalidate().await;
                }
            }
        }
        let events = self.fallback.load().await?;
        Ok((StoreSource::Fallback, events))
    }
}
