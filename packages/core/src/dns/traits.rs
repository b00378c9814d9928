//! DNS backend trait

use std::net::IpAddr;

use futures::future::BoxFuture;

use crate::error::Result;

/// A name lookup backend.
///
/// Backends only turn a host name into addresses; IP literals, empty hosts,
/// service names and result ordering are handled by `TcpResolver`.
pub trait Resolve: Send + Sync + 'static {
    /// Look up every address of `host`.
    fn lookup(&self, host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>>;
}
