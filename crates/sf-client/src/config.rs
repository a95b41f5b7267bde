//! Transport policy: timeouts, connection pooling, compression.
//!
//! Nothing above the transport adds timeouts of its own, so whatever is
//! configured here bounds every call made by the auth and DML layers.

use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Environment variable overriding [`ClientConfig::timeout`], in seconds.
pub const TIMEOUT_ENV: &str = "SF_HTTP_TIMEOUT_SECS";

/// Environment variable overriding [`ClientConfig::connect_timeout`], in
/// seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "SF_HTTP_CONNECT_TIMEOUT_SECS";

/// Settings for the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-exchange timeout, from connect to the last body byte.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool: PoolConfig,
    /// Send `Accept-Encoding` and decode gzip/deflate bodies.
    pub accept_compressed: bool,
    pub user_agent: String,
    /// Emit `debug!` events for every request and response.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool: PoolConfig::default(),
            accept_compressed: true,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Defaults, with timeouts taken from `SF_HTTP_TIMEOUT_SECS` and
    /// `SF_HTTP_CONNECT_TIMEOUT_SECS` when they are set.
    ///
    /// A variable that is set but not a whole number of seconds is an error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(timeout) = env_secs(TIMEOUT_ENV)? {
            config.timeout = timeout;
        }
        if let Some(timeout) = env_secs(CONNECT_TIMEOUT_ENV)? {
            config.connect_timeout = timeout;
        }
        Ok(config)
    }
}

fn env_secs(name: &str) -> Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => parse_secs(name, &raw).map(Some),
        _ => Ok(None),
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::new(ErrorKind::Config(format!(
            "{} must be a positive number of seconds, got {:?}",
            name, raw
        )))),
    }
}

/// Idle connection pool limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub idle_timeout: Duration,
    pub max_idle_per_host: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(90),
            max_idle_per_host: 10,
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_pool(mut self, pool: PoolConfig) -> Self {
        self.config.pool = pool;
        self
    }

    /// Accept gzip/deflate responses. On by default.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
