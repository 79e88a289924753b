use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use backend_domain::{EventStore, KeyValueStore, StoreSource, TryOnEvent};

/// Event collection kept as one JSON array under a single key.
pub struct KvEventStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl KvEventStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }
}

#[async_trait]
impl EventStore for KvEventStore {
    fn source(&self) -> StoreSource {
        StoreSource::Durable
    }

    async fn load(&self) -> anyhow::Result<Vec<TryOnEvent>> {
        let Some(raw) = self.kv.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<TryOnEvent>>(&raw) {
            Ok(events) => Ok(events),
            Err(err) => {
                warn!(key = %self.key, "stored events unreadable, treating as empty: {}", err);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&self, events: &[TryOnEvent]) -> anyhow::Result<()> {
        let payload = serde_json::to_string(events)?;
        self.kv.set(&self.key, &payload).await
    }
}
