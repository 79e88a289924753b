use std::sync::Arc;

use async_trait::async_trait;

use crate::ports::KeyValueStore;

/// Hands out a live durable-backend handle, or `None` when the backend is
/// unconfigured or unreachable. Never returns an error.
#[async_trait]
pub trait BackendConnector: Send + Sync {
    async fn acquire(&self) -> Option<Arc<dyn KeyValueStore>>;

    /// Drops the cached handle so the next `acquire` reconnects from scratch.
    async fn invalidate(&self);

    fn is_configured(&self) -> bool;
}
