//! TCP name resolution bound to an event loop

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use super::gai::GaiResolver;
use super::hickory::HickoryResolver;
use super::results::{ResolverEntry, ResolverResults};
use super::service;
use super::traits::Resolve;
use crate::config::{ResolverBackend, ResolverSettings};
use crate::context::ContextHandle;
use crate::error::{self, Result};
use crate::pending::{PendingOps, cancellable};

/// Lookup hints, matching the getaddrinfo flags of the same names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ResolveFlags {
    /// An empty host resolves to the unspecified addresses, for binding.
    pub passive: bool,
    /// The host must be an IP literal; no lookup is made.
    pub numeric_host: bool,
    /// The service must be a port number.
    pub numeric_service: bool,
}

impl ResolveFlags {
    #[must_use]
    pub fn passive() -> Self {
        Self {
            passive: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn numeric() -> Self {
        Self {
            numeric_host: true,
            numeric_service: true,
            ..Self::default()
        }
    }
}

/// Resolves (host, service) pairs into TCP endpoints.
///
/// Dropping the resolver aborts lookups that are still in flight.
pub struct TcpResolver {
    context: ContextHandle,
    backend: Arc<dyn Resolve>,
    settings: ResolverSettings,
    pending: Arc<PendingOps>,
}

impl TcpResolver {
    /// A resolver using the backend selected in the context configuration.
    pub fn new(context: &ContextHandle) -> Self {
        let backend: Arc<dyn Resolve> = match context.config().resolver.backend {
            ResolverBackend::Gai => Arc::new(GaiResolver::new()),
            ResolverBackend::Hickory => Arc::new(HickoryResolver::new()),
        };
        Self::with_backend(context, backend)
    }

    pub fn with_backend(context: &ContextHandle, backend: Arc<dyn Resolve>) -> Self {
        Self {
            context: context.clone(),
            backend,
            settings: context.config().resolver.clone(),
            pending: Arc::new(PendingOps::default()),
        }
    }

    #[must_use]
    pub fn context(&self) -> &ContextHandle {
        &self.context
    }

    /// Resolve on the calling thread, blocking until the lookup finishes.
    ///
    /// Must not be called from inside an asynchronous task.
    ///
    /// # Errors
    ///
    /// Propagates the lookup failure: `HostNotFound`, `ServiceNotFound`,
    /// `Resolve`, `TimedOut`, or `Reactor` if the reactor cannot start.
    pub fn resolve(&self, host: &str, service: &str) -> Result<ResolverResults> {
        self.resolve_with_flags(host, service, ResolveFlags::default())
    }

    /// `resolve` with explicit lookup hints.
    ///
    /// # Errors
    ///
    /// See [`TcpResolver::resolve`].
    pub fn resolve_with_flags(
        &self,
        host: &str,
        service: &str,
        flags: ResolveFlags,
    ) -> Result<ResolverResults> {
        self.context.block_on(self.lookup(host, service, flags))?
    }

    /// Resolve in the background and call `handler` with the results on a
    /// thread running the context. The caller returns immediately.
    pub fn async_resolve<H>(&self, host: &str, service: &str, handler: H)
    where
        H: FnOnce(Result<ResolverResults>) + Send + 'static,
    {
        self.async_resolve_with_flags(host, service, ResolveFlags::default(), handler);
    }

    pub fn async_resolve_with_flags<H>(
        &self,
        host: &str,
        service: &str,
        flags: ResolveFlags,
        handler: H,
    ) where
        H: FnOnce(Result<ResolverResults>) + Send + 'static,
    {
        let op = cancellable(self.pending.register(), self.lookup(host, service, flags));
        self.context.spawn_async_op(op, handler);
    }

    /// Abort every in-flight `async_resolve`; their handlers receive
    /// `OperationAborted`. Returns how many were aborted.
    pub fn cancel(&self) -> usize {
        let cancelled = self.pending.cancel_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "resolves cancelled");
        }
        cancelled
    }

    fn lookup(
        &self,
        host: &str,
        service: &str,
        flags: ResolveFlags,
    ) -> impl Future<Output = Result<ResolverResults>> + Send + 'static {
        let lookup = Lookup {
            host: host.to_owned(),
            service: service.to_owned(),
            flags,
            backend: Arc::clone(&self.backend),
            prefer_ipv6: self.settings.prefer_ipv6,
            timeout: self.settings.timeout(),
        };
        lookup.run()
    }
}

impl Drop for TcpResolver {
    fn drop(&mut self) {
        self.pending.cancel_all();
    }
}

impl fmt::Debug for TcpResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpResolver")
            .field("settings", &self.settings)
            .field("pending", &self.pending.len())
            .finish()
    }
}

struct Lookup {
    host: String,
    service: String,
    flags: ResolveFlags,
    backend: Arc<dyn Resolve>,
    prefer_ipv6: bool,
    timeout: Option<Duration>,
}

impl Lookup {
    async fn run(self) -> Result<ResolverResults> {
        let port = service::port_for(&self.service, self.flags.numeric_service)?;
        let mut addrs = self.addresses().await?;
        if addrs.is_empty() {
            return Err(error::host_not_found(&self.host));
        }

        if self.prefer_ipv6 {
            addrs.sort_by_key(|ip| !ip.is_ipv6());
        } else {
            addrs.sort_by_key(IpAddr::is_ipv6);
        }
        let mut seen = Vec::with_capacity(addrs.len());
        addrs.retain(|ip| {
            if seen.contains(ip) {
                false
            } else {
                seen.push(*ip);
                true
            }
        });

        tracing::trace!(host = %self.host, service = %self.service, count = addrs.len(), "resolved");
        let entries = addrs
            .into_iter()
            .map(|ip| ResolverEntry::new(SocketAddr::new(ip, port), &self.host, &self.service))
            .collect();
        Ok(ResolverResults::new(entries))
    }

    async fn addresses(&self) -> Result<Vec<IpAddr>> {
        if self.host.is_empty() {
            return Ok(if self.flags.passive {
                vec![
                    IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                    IpAddr::V6(Ipv6Addr::UNSPECIFIED),
                ]
            } else {
                vec![
                    IpAddr::V4(Ipv4Addr::LOCALHOST),
                    IpAddr::V6(Ipv6Addr::LOCALHOST),
                ]
            });
        }
        if let Some(ip) = parse_ip_literal(&self.host) {
            return Ok(vec![ip]);
        }
        if self.flags.numeric_host {
            return Err(error::host_not_found(&self.host));
        }

        let lookup = self.backend.lookup(&self.host);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, lookup)
                .await
                .map_err(|_| error::timed_out(&self.host))?,
            None => lookup.await,
        };
        if let Err(e) = &result {
            tracing::debug!(host = %self.host, "lookup failed: {}", e);
        }
        result
    }
}

/// Accepts plain and bracketed IP literals (`::1`, `[::1]`).
fn parse_ip_literal(host: &str) -> Option<IpAddr> {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse().ok()
}
