use std::time::Duration;

/// Upper bound on stored events per collection.
pub const RETENTION_CAP: usize = 10_000;

/// Number of events returned in `recentEvents`.
pub const RECENT_EVENTS_LIMIT: usize = 20;

pub const DEFAULT_EVENTS_KEY: &str = "tryon:events";

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub events_key: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            events_key: DEFAULT_EVENTS_KEY.to_string(),
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub redis_url: Option<String>,
    pub max_retries: usize,
    pub max_delay_ms: u64,
    pub connection_timeout: Duration,
    pub response_timeout: Duration,
}

/// Commands one durable write issues after connecting: GET then SET.
const COMMANDS_PER_CALL: u32 = 2;

impl BackendConfig {
    pub fn is_configured(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Longest a single durable call can take before it gives up: every
    /// connect attempt timing out on both connect and handshake, each retry
    /// delay at its jittered maximum, then every command hitting the
    /// response timeout.
    pub fn worst_case_latency(&self) -> Duration {
        let attempts = u32::try_from(self.max_retries.saturating_add(1)).unwrap_or(u32::MAX);
        let retries = attempts.saturating_sub(1);
        let per_attempt = self.connection_timeout.saturating_add(self.response_timeout);
        let max_backoff = Duration::from_millis(self.max_delay_ms.saturating_mul(3) / 2);
        per_attempt
            .saturating_mul(attempts)
            .saturating_add(max_backoff.saturating_mul(retries))
            .saturating_add(self.response_timeout.saturating_mul(COMMANDS_PER_CALL))
    }
}

/// Which collection served a load or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSource {
    Durable,
    Fallback,
}

impl StoreSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreSource::Durable => "durable",
            StoreSource::Fallback => "fallback",
        }
    }
}
