//! Legacy asio-style names over mplex-io
//!
//! WebSocket code written against the older event-loop API expects
//! `io_service` with `post`/`reset`, nested `strand` and `work` types, a
//! timer with `expires_from_now`, query-based resolver calls returning a
//! forward iterator, and `socket_base::max_connections`. This crate provides
//! exactly those names and forwards every call to the modern primitives in
//! [`mplex_io`].
//!
//! ```no_run
//! use mplex_asio::IoService;
//! use mplex_asio::io_service::Strand;
//!
//! let io = IoService::new();
//! let strand = Strand::new(&io);
//! io.post(strand.wrap(|| println!("serialized")));
//! assert_eq!(io.run(), 1);
//! io.reset();
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod io_service;
pub mod ip;
pub mod socket_base;
pub mod steady_timer;

pub use io_service::IoService;
pub use steady_timer::SteadyTimer;

// Error reporting is the modern one; only the names change.
pub use mplex_io::timer::{is_neg, milliseconds};
pub use mplex_io::{ContextHandle, Error as ErrorCode, ErrorKind as Errc, IoConfig, Result};
