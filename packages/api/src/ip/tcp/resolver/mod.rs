//! `ip::tcp::resolver` with its nested `query` and `iterator`

mod iterator;
mod query;

use std::sync::Arc;

pub use iterator::ResolverIterator;
pub use mplex_io::{Resolve, ResolveFlags, ResolverEntry, ResolverResults};
pub use query::Query;

/// The legacy name of the resolver's forward iterator.
pub use iterator::ResolverIterator as Iterator;

use crate::{IoService, Result};

/// Query-based front end to `mplex_io::TcpResolver`.
///
/// Dropping the resolver aborts resolves still in flight.
#[derive(Debug)]
pub struct Resolver {
    inner: mplex_io::TcpResolver,
}

impl Resolver {
    #[must_use]
    pub fn new(io: &IoService) -> Self {
        Self {
            inner: mplex_io::TcpResolver::new(io.as_context()),
        }
    }

    #[must_use]
    pub fn with_backend(io: &IoService, backend: Arc<dyn Resolve>) -> Self {
        Self {
            inner: mplex_io::TcpResolver::with_backend(io.as_context(), backend),
        }
    }

    /// Blocking lookup; the results come back as a fresh iterator at the
    /// first entry.
    ///
    /// # Errors
    ///
    /// Whatever the lookup reports, unchanged.
    pub fn resolve(&self, query: &Query) -> Result<ResolverIterator> {
        self.inner
            .resolve_with_flags(query.host_name(), query.service_name(), query.flags())
            .map(ResolverIterator::new)
    }

    /// Start a lookup and return immediately.
    ///
    /// `handler` runs exactly once on the loop. On failure it gets the error
    /// and an end iterator.
    pub fn async_resolve<H>(&self, query: &Query, handler: H)
    where
        H: FnOnce(Result<()>, ResolverIterator) + Send + 'static,
    {
        self.inner.async_resolve_with_flags(
            query.host_name(),
            query.service_name(),
            query.flags(),
            move |result| match result {
                Ok(results) => handler(Ok(()), ResolverIterator::new(results)),
                Err(err) => handler(Err(err), ResolverIterator::default()),
            },
        );
    }

    /// Abort outstanding `async_resolve` calls; returns how many.
    pub fn cancel(&self) -> usize {
        self.inner.cancel()
    }

    #[must_use]
    pub fn as_resolver(&self) -> &mplex_io::TcpResolver {
        &self.inner
    }
}
