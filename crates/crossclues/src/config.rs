//! Server configuration.

use std::time::Duration;

use crate::CrossCluesError;

/// Environment variable overriding [`ServerConfig::bind_addr`].
pub const BIND_ENV: &str = "CROSSCLUES_BIND";

/// Environment variable overriding [`ServerConfig::idle_timeout`], in seconds.
pub const IDLE_TIMEOUT_ENV: &str = "CROSSCLUES_IDLE_TIMEOUT_SECS";

/// Settings for a [`CrossCluesServer`](crate::CrossCluesServer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to. Port 0 picks a free port.
    ///
    /// Default: `127.0.0.1:8080`.
    pub bind_addr: String,

    /// A connection that sends nothing for this long is closed.
    ///
    /// Default: 300 seconds.
    pub idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            idle_timeout: Duration::from_secs(300),
        }
    }
}

impl ServerConfig {
    /// Defaults, overridden by `CROSSCLUES_BIND` and
    /// `CROSSCLUES_IDLE_TIMEOUT_SECS` when set.
    pub fn from_env() -> Result<Self, CrossCluesError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CrossCluesError> {
        let mut config = Self::default();

        if let Some(addr) = lookup(BIND_ENV) {
            let addr = addr.trim();
            if !addr.is_empty() {
                config.bind_addr = addr.to_string();
            }
        }

        if let Some(raw) = lookup(IDLE_TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                CrossCluesError::Config {
                    key: IDLE_TIMEOUT_ENV,
                    value: raw.clone(),
                }
            })?;
            if secs == 0 {
                return Err(CrossCluesError::Config {
                    key: IDLE_TIMEOUT_ENV,
                    value: raw,
                });
            }
            config.idle_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
