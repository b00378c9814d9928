//! Reactor runtime sizing

use serde::{Deserialize, Serialize};

/// Sizing of the tokio runtime that drives timers and lookups.
///
/// Handlers never run on these threads; they only complete operations and
/// hand the completion back to the context's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactorConfig {
    pub worker_threads: usize,
    pub max_blocking_threads: usize,
    pub thread_name: String,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            worker_threads: 1,
            max_blocking_threads: 16,
            thread_name: "mplex-io-reactor".to_string(),
        }
    }
}

impl ReactorConfig {
    #[must_use]
    pub fn production() -> Self {
        Self {
            worker_threads: 2,
            max_blocking_threads: 64,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn development() -> Self {
        Self {
            max_blocking_threads: 4,
            ..Self::default()
        }
    }

    /// Validate reactor configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `worker_threads` is 0 or above 256
    /// - `max_blocking_threads` is 0
    /// - `thread_name` is empty
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_threads == 0 {
            return Err("worker_threads must be greater than 0".to_string());
        }
        if self.worker_threads > 256 {
            return Err("worker_threads must not exceed 256".to_string());
        }
        if self.max_blocking_threads == 0 {
            return Err("max_blocking_threads must be greater than 0".to_string());
        }
        if self.thread_name.is_empty() {
            return Err("thread_name cannot be empty".to_string());
        }
        Ok(())
    }
}
