use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{BackendConfig, RuntimeConfig, DEFAULT_EVENTS_KEY};

use crate::config::validate_redis_url;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub redis_url: Option<String>,
    pub events_key: String,
    pub redis_max_retries: usize,
    pub redis_max_delay_ms: u64,
    pub redis_connection_timeout_ms: u64,
    pub redis_response_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            redis_url: None,
            events_key: DEFAULT_EVENTS_KEY.to_string(),
            redis_max_retries: 1,
            redis_max_delay_ms: 500,
            redis_connection_timeout_ms: 1_000,
            redis_response_timeout_ms: 1_000,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("TRYON_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml_str(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn normalize(&mut self) {
        if let Some(url) = &self.redis_url {
            if url.trim().is_empty() {
                self.redis_url = None;
            } else {
                self.redis_url = Some(url.trim().to_string());
            }
        }
        if self.events_key.trim().is_empty() {
            self.events_key = DEFAULT_EVENTS_KEY.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if let Some(url) = &self.redis_url {
            validate_redis_url(url).map_err(|err| anyhow!("invalid redis_url: {}", err))?;
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.redis_connection_timeout_ms == 0 || self.redis_response_timeout_ms == 0 {
            return Err(anyhow!("redis timeouts must be greater than 0"));
        }
        let backend = self.to_backend_config();
        if backend.is_configured() {
            let worst_case = backend.worst_case_latency();
            let request_timeout = Duration::from_secs(self.request_timeout_seconds);
            if worst_case >= request_timeout {
                return Err(anyhow!(
                    "redis retry budget of {}ms does not fit request_timeout_seconds = {}; \
                     lower redis_max_retries or the redis timeouts",
                    worst_case.as_millis(),
                    self.request_timeout_seconds
                ));
            }
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            events_key: self.events_key.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_backend_config(&self) -> BackendConfig {
        BackendConfig {
            redis_url: self.redis_url.clone(),
            max_retries: self.redis_max_retries,
            max_delay_ms: self.redis_max_delay_ms,
            connection_timeout: Duration::from_millis(self.redis_connection_timeout_ms),
            response_timeout: Duration::from_millis(self.redis_response_timeout_ms),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("TRYON_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("REDIS_URL") {
            self.redis_url = Some(value);
        }
        if let Some(value) = lookup("TRYON_EVENTS_KEY") {
            self.events_key = value;
        }
        if let Some(value) = lookup("TRYON_REDIS_MAX_RETRIES") {
            self.redis_max_retries = value.parse().unwrap_or(self.redis_max_retries);
        }
        if let Some(value) = lookup("TRYON_REDIS_MAX_DELAY_MS") {
            self.redis_max_delay_ms = value.parse().unwrap_or(self.redis_max_delay_ms);
        }
        if let Some(value) = lookup("TRYON_REDIS_CONNECTION_TIMEOUT_MS") {
            self.redis_connection_timeout_ms =
                value.parse().unwrap_or(self.redis_connection_timeout_ms);
        }
        if let Some(value) = lookup("TRYON_REDIS_RESPONSE_TIMEOUT_MS") {
            self.redis_response_timeout_ms =
                value.parse().unwrap_or(self.redis_response_timeout_ms);
        }
        if let Some(value) = lookup("TRYON_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("TRYON_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}
