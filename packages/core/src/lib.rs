//! # mplex-io
//!
//! The event loop, serialized executors, steady timers and TCP name
//! resolution underneath the mplex WebSocket transport.
//!
//! - **`IoContext`**: FIFO handler queue driven by any number of threads
//!   calling `run`, with outstanding-work accounting so `run` returns once
//!   nothing is left to do. Threads and handlers share it through
//!   cloneable `ContextHandle`s; dropping the `IoContext` shuts it down
//! - **`Strand`**: mutual exclusion between handlers without locks in user code
//! - **`WorkGuard`**: keeps `run` alive while no work is queued
//! - **`SteadyTimer`**: monotonic deadlines with cancellable `async_wait`
//! - **`TcpResolver`**: blocking and asynchronous (host, service) lookups
//!   producing a shared snapshot of endpoints
//!
//! Timers and lookups are waited on by a tokio runtime started on first use;
//! every completion handler still runs on a thread inside `run`.
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use mplex_io::{IoContext, SteadyTimer};
//!
//! let ctx = IoContext::new();
//! let mut timer = SteadyTimer::new(&ctx);
//! timer.expires_after(Duration::from_millis(10));
//! timer.async_wait(|result| assert!(result.is_ok()));
//! ctx.run();
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod dns;
pub mod error;
pub mod executor;
pub mod net;
mod pending;
pub mod strand;
pub mod telemetry;
pub mod timer;

pub mod prelude;

pub use crate::prelude::*;
