//! `socket_base` constants under their pre-rename names

/// Old name of `MAX_LISTEN_CONNECTIONS`.
pub const MAX_CONNECTIONS: i32 = mplex_io::net::MAX_LISTEN_CONNECTIONS;

pub use mplex_io::net::ReuseAddress;
