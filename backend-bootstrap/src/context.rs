use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use backend_application::{AppState, EventStores, MemoryEventStore, Metrics};
use backend_infrastructure::{AppConfig, RedisConnector};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let runtime_config = config.to_runtime_config();
        let backend_config = config.to_backend_config();

        if backend_config.is_configured() {
            info!(key = %runtime_config.events_key, "durable store configured, connecting lazily");
        } else {
            warn!("REDIS_URL not set, events are kept in process memory only");
        }

        let connector = Arc::new(RedisConnector::new(backend_config));
        let stores = EventStores::new(
            connector,
            Arc::new(MemoryEventStore::new()),
            runtime_config.events_key.clone(),
        );

        let state = AppState {
            config: runtime_config,
            stores: Arc::new(stores),
            metrics: Arc::new(Metrics::default()),
        };

        Self { state }
    }
}
