//! Counters describing what an `IoContext` has done
//!
//! Cheap enough to update on every handler; read them with
//! `IoContext::stats().snapshot()`.

pub mod context_stats;

pub use context_stats::{ContextStats, ContextStatsSnapshot};
