// In-memory doubles for the store and connector ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;

use backend_domain::{utc_date, BackendConnector, KeyValueStore, TryOnEvent};

pub fn sample_event(outfit_id: &str, timestamp: i64) -> TryOnEvent {
    TryOnEvent {
        timestamp,
        outfit_id: outfit_id.to_string(),
        outfit_name: format!("Outfit {}", outfit_id),
        date: utc_date(timestamp),
        session_id: None,
        user_agent: None,
        referrer: None,
    }
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("kv lock")
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().expect("kv lock").get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated read failure"));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("simulated write failure"));
        }
        self.insert(key, value);
        Ok(())
    }
}

/// Connector that always hands out the same store, or nothing.
pub struct StaticConnector {
    store: Option<Arc<MemoryKeyValueStore>>,
    available: AtomicBool,
    acquisitions: AtomicUsize,
    invalidations: AtomicUsize,
}

impl StaticConnector {
    pub fn available(store: Arc<MemoryKeyValueStore>) -> Self {
        Self {
            store: Some(store),
            available: AtomicBool::new(true),
            acquisitions: AtomicUsize::new(0),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            store: None,
            available: AtomicBool::new(false),
            acquisitions: AtomicUsize::new(0),
            invalidations: AtomicUsize::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn acquisitions(&self) -> usize {
        self.acquisitions.load(Ordering::SeqCst)
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackendConnector for StaticConnector {
    async fn acquire(&self) -> Option<Arc<dyn KeyValueStore>> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return None;
        }
        self.store
            .clone()
            .map(|store| store as Arc<dyn KeyValueStore>)
    }

    async fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }

    fn is_configured(&self) -> bool {
        self.store.is_some()
    }
}
