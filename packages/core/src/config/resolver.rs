//! Resolver backend selection

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which lookup implementation a `TcpResolver` uses by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverBackend {
    /// System getaddrinfo, run on the reactor's blocking pool.
    #[default]
    Gai,
    /// hickory-resolver using the system resolv.conf.
    Hickory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    pub backend: ResolverBackend,
    /// Put IPv6 endpoints ahead of IPv4 ones in the results.
    pub prefer_ipv6: bool,
    /// Upper bound for a single lookup; `None` waits for the backend.
    pub timeout_ms: Option<u64>,
}

impl ResolverSettings {
    #[must_use]
    pub fn production() -> Self {
        Self {
            timeout_ms: Some(5_000),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Validate resolver configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or longer than a minute.
    pub fn validate(&self) -> Result<(), String> {
        match self.timeout_ms {
            Some(0) => Err("timeout_ms must be greater than 0".to_string()),
            Some(ms) if ms > 60_000 => Err("timeout_ms should not exceed 60 seconds".to_string()),
            _ => Ok(()),
        }
    }
}
