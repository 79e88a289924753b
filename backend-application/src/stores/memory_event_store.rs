use async_trait::async_trait;
use tokio::sync::RwLock;

use backend_domain::{EventStore, StoreSource, TryOnEvent};

/// Process-local fallback collection. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<TryOnEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reset(&self) {
        self.events.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    fn source(&self) -> StoreSource {
        StoreSource::Fallback
    }

    async fn load(&self) -> anyhow::Result<Vec<TryOnEvent>> {
        Ok(self.events.read().await.clone())
    }

    async fn save(&self, events: &[TryOnEvent]) -> anyhow::Result<()> {
        *self.events.write().await = events.to_vec();
        Ok(())
    }
}
