use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use backend_domain::KeyValueStore;

/// `KeyValueStore` over a shared Redis connection. Cloning the manager is cheap
/// and every clone multiplexes onto the same connection.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    conn: ConnectionManager,
}

impl RedisKeyValueStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }
}
