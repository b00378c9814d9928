//! DNS resolution via the [hickory-resolver](https://github.com/hickory-dns/hickory-dns) crate

use std::fmt;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;

use futures::future::BoxFuture;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::LookupIpStrategy;
use tokio::sync::OnceCell;

use super::traits::Resolve;
use crate::error::{self, Result};

/// Wrapper around an asynchronous hickory `Resolver`, which implements the
/// `Resolve` trait.
#[derive(Default, Clone)]
pub struct HickoryResolver {
    /// Built on first lookup, inside the reactor runtime.
    state: Arc<OnceCell<TokioResolver>>,
}

impl HickoryResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Resolve for HickoryResolver {
    fn lookup(&self, host: &str) -> BoxFuture<'static, Result<Vec<IpAddr>>> {
        let state = Arc::clone(&self.state);
        let host = host.to_owned();
        Box::pin(async move {
            let resolver = state
                .get_or_try_init(|| async { new_resolver(&host) })
                .await?;
            let lookup = resolver
                .lookup_ip(host.as_str())
                .await
                .map_err(|e| error::resolve(&host, io::Error::other(e)))?;
            Ok(lookup.iter().collect())
        })
    }
}

/// Create a new resolver from the system configuration, which reads
/// `/etc/resolv.conf` on unix. Both IPv4 and IPv6 addresses are looked up.
fn new_resolver(host: &str) -> Result<TokioResolver> {
    let mut builder = TokioResolver::builder_tokio().map_err(|e| {
        tracing::warn!("error reading DNS system conf for hickory-dns: {}", e);
        error::resolve(host, io::Error::other(e))
    })?;
    builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    Ok(builder.build())
}

impl fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HickoryResolver")
            .field("initialized", &self.state.initialized())
            .finish()
    }
}
