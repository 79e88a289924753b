use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

use backend_domain::{BackendConfig, BackendConnector, KeyValueStore};

use crate::repositories::RedisKeyValueStore;

const BACKOFF_EXPONENT_BASE: u64 = 2;
const BACKOFF_FACTOR_MS: u64 = 100;

/// One connect attempt and its outcome. Callers arriving while it runs wait
/// for the same outcome instead of starting their own attempt.
type ConnectSlot = Arc<OnceCell<Option<ConnectionManager>>>;

/// Lazily connects to Redis and caches the connection until it is invalidated.
/// Without a configured URL every `acquire` returns `None` without I/O.
pub struct RedisConnector {
    config: BackendConfig,
    slot: RwLock<ConnectSlot>,
}

impl RedisConnector {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            slot: RwLock::new(ConnectSlot::default()),
        }
    }

    fn manager_config(&self) -> ConnectionManagerConfig {
        ConnectionManagerConfig::new()
            .set_exponent_base(BACKOFF_EXPONENT_BASE)
            .set_factor(BACKOFF_FACTOR_MS)
            .set_number_of_retries(self.config.max_retries)
            .set_max_delay(self.config.max_delay_ms)
            .set_connection_timeout(self.config.connection_timeout)
            .set_response_timeout(self.config.response_timeout)
    }

    async fn connect(&self, url: &str) -> Result<ConnectionManager> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new_with_config(client, self.manager_config()).await?;
        Ok(manager)
    }

    async fn connect_or_log(&self, url: &str) -> Option<ConnectionManager> {
        match self.connect(url).await {
            Ok(conn) => {
                info!("connected to redis");
                Some(conn)
            }
            Err(err) => {
                warn!("redis unavailable, using fallback store: {:#}", err);
                None
            }
        }
    }

    /// Forgets a failed attempt so the next call connects from scratch.
    async fn clear_failed(&self, failed: &ConnectSlot) {
        let mut slot = self.slot.write().await;
        if Arc::ptr_eq(&*slot, failed) {
            *slot = ConnectSlot::default();
        }
    }

    #[cfg(test)]
    async fn has_connection(&self) -> bool {
        self.slot.read().await.get().is_some_and(Option::is_some)
    }

    fn wrap(conn: &ConnectionManager) -> Arc<dyn KeyValueStore> {
        Arc::new(RedisKeyValueStore::new(conn.clone()))
    }
}

#[async_trait]
impl BackendConnector for RedisConnector {
    async fn acquire(&self) -> Option<Arc<dyn KeyValueStore>> {
        let url = self.config.redis_url.as_deref()?;

        let slot = self.slot.read().await.clone();
        match slot.get_or_init(|| self.connect_or_log(url)).await {
            Some(conn) => Some(Self::wrap(conn)),
            None => {
                self.clear_failed(&slot).await;
                None
            }
        }
    }

    async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        if slot.get().is_some_and(Option::is_some) {
            *slot = ConnectSlot::default();
            debug!("dropped cached redis connection");
        }
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use tokio::net::TcpListener;

    use super::*;

    fn backend_config(redis_url: Option<&str>) -> BackendConfig {
        BackendConfig {
            redis_url: redis_url.map(ToString::to_string),
            max_retries: 0,
            max_delay_ms: 10,
            connection_timeout: Duration::from_millis(200),
            response_timeout: Duration::from_millis(200),
        }
    }

    #[tokio::test]
    async fn unconfigured_connector_is_permanently_unavailable() {
        let connector = RedisConnector::new(backend_config(None));
        assert!(!connector.is_configured());
        assert!(connector.acquire().await.is_none());
        assert!(connector.acquire().await.is_none());
    }

    #[tokio::test]
    async fn malformed_url_reports_unavailable() {
        let connector = RedisConnector::new(backend_config(Some("redis://[::1")));
        assert!(connector.is_configured());
        assert!(connector.acquire().await.is_none());
        assert!(!connector.has_connection().await);
    }

    #[tokio::test]
    async fn refused_connection_reports_unavailable_and_retries_next_call() {
        let connector = RedisConnector::new(backend_config(Some("redis://127.0.0.1:1/")));
        assert!(connector.acquire().await.is_none());
        assert!(connector.slot.read().await.get().is_none());
        assert!(connector.acquire().await.is_none());
        connector.invalidate().await;
        assert!(!connector.has_connection().await);
    }

    #[tokio::test]
    async fn silent_backend_gives_up_within_its_budget() {
        // Bound but never accepted: the TCP handshake completes, no reply ever comes.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let url = format!("redis://{}/", listener.local_addr().expect("addr"));
        let connector = RedisConnector::new(backend_config(Some(&url)));

        let started = Instant::now();
        assert!(connector.acquire().await.is_none());
        assert!(started.elapsed() <= connector.config.worst_case_latency());
        drop(listener);
    }

    #[tokio::test]
    async fn concurrent_acquires_share_one_connect_attempt() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let url = format!("redis://{}/", listener.local_addr().expect("addr"));
        let connector = RedisConnector::new(backend_config(Some(&url)));

        let started = Instant::now();
        let (a, b, c, d) = tokio::join!(
            connector.acquire(),
            connector.acquire(),
            connector.acquire(),
            connector.acquire()
        );
        let elapsed = started.elapsed();

        assert!(a.is_none() && b.is_none() && c.is_none() && d.is_none());
        // one attempt is at most 400ms here; four queued attempts would take at least 800ms
        assert!(elapsed < Duration::from_millis(700), "took {:?}", elapsed);
        assert!(connector.slot.read().await.get().is_none());
        drop(listener);
    }
}
