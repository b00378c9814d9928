//! `ip::tcp`: endpoint, protocol values, sockets and the query-based
//! resolver

pub mod resolver;
mod socket;

pub use mplex_io::net::{Endpoint, Tcp};
pub use resolver::{Iterator, Query, Resolver};
pub use socket::{Acceptor, Socket};

/// TCP over IPv4.
#[must_use]
pub fn v4() -> Tcp {
    Tcp::v4()
}

/// TCP over IPv6.
#[must_use]
pub fn v6() -> Tcp {
    Tcp::v6()
}
