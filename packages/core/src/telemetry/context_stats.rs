//! Event loop statistics

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Event loop statistics
#[derive(Debug)]
pub struct ContextStats {
    /// Handlers queued through `post`, `dispatch` fallbacks and completions
    pub handlers_posted: AtomicU64,
    /// Handlers that ran to completion or unwound
    pub handlers_executed: AtomicU64,
    /// Timer waits and async resolves started
    pub async_ops_started: AtomicU64,
    /// Async operations that completed with `OperationAborted`
    pub async_ops_aborted: AtomicU64,
    pub created_at: Instant,
}

impl Default for ContextStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers_posted: AtomicU64::new(0),
            handlers_executed: AtomicU64::new(0),
            async_ops_started: AtomicU64::new(0),
            async_ops_aborted: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    pub fn record_post(&self) {
        self.handlers_posted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_execution(&self) {
        self.handlers_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_async_start(&self) {
        self.async_ops_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_abort(&self) {
        self.async_ops_aborted.fetch_add(1, Ordering::Relaxed);
    }

    /// Time since the context was created
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Point-in-time copy of all counters.
    #[must_use]
    pub fn snapshot(&self) -> ContextStatsSnapshot {
        ContextStatsSnapshot {
            handlers_posted: self.handlers_posted.load(Ordering::Relaxed),
            handlers_executed: self.handlers_executed.load(Ordering::Relaxed),
            async_ops_started: self.async_ops_started.load(Ordering::Relaxed),
            async_ops_aborted: self.async_ops_aborted.load(Ordering::Relaxed),
            uptime_ms: u64::try_from(self.uptime().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContextStatsSnapshot {
    pub handlers_posted: u64,
    pub handlers_executed: u64,
    pub async_ops_started: u64,
    pub async_ops_aborted: u64,
    pub uptime_ms: u64,
}
