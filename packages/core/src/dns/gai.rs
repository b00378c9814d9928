//! System getaddrinfo-based DNS resolver

use std::net::IpAddr;

use futures::future::BoxFuture;

use super::traits::Resolve;
use crate::error::{self, Result};

/// Resolver using the system `getaddrinfo`, run on the reactor's blocking
/// pool so the lookup never stalls a reactor thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct GaiResolver;

impl GaiResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolve for GaiResolver {
    fn lookup(&self, host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>> {
        let host = host.to_owned();
        Box::pin(async move {
            // Port doesn't matter for hostname resolution
            let addrs = tokio::net::lookup_host((host.as_str(), 0))
                .await
                .map_err(|e| error::resolve(&host, e))?;
            Ok(addrs.map(|addr| addr.ip()).collect())
        })
    }
}
