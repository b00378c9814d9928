//! Socket-level constants, options, protocol values and connection helpers

pub mod connect;
pub mod socket_base;
pub mod tcp;

pub use connect::connect_first;
pub use socket_base::{MAX_LISTEN_CONNECTIONS, ReuseAddress, listen};
pub use tcp::{Endpoint, Family, Tcp};
