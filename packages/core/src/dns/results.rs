//! Resolved endpoints
//!
//! A lookup produces one immutable, reference-counted snapshot. Cloning a
//! `ResolverResults` shares the snapshot instead of copying entries.

use std::net::SocketAddr;
use std::slice;
use std::sync::Arc;

/// One resolved endpoint together with the names it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolverEntry {
    endpoint: SocketAddr,
    host_name: String,
    service_name: String,
}

impl ResolverEntry {
    pub fn new(
        endpoint: SocketAddr,
        host_name: impl Into<String>,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            host_name: host_name.into(),
            service_name: service_name.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> SocketAddr {
        self.endpoint
    }

    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl From<&ResolverEntry> for SocketAddr {
    fn from(entry: &ResolverEntry) -> Self {
        entry.endpoint
    }
}

impl From<ResolverEntry> for SocketAddr {
    fn from(entry: ResolverEntry) -> Self {
        entry.endpoint
    }
}

/// Shared snapshot of the entries produced by one lookup.
#[derive(Debug, Clone)]
pub struct ResolverResults {
    entries: Arc<[ResolverEntry]>,
}

impl Default for ResolverResults {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ResolverResults {
    #[must_use]
    pub fn new(entries: Vec<ResolverEntry>) -> Self {
        Self {
            entries: Arc::from(entries),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ResolverEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, ResolverEntry> {
        self.entries.iter()
    }

    pub fn endpoints(&self) -> impl Iterator<Item = SocketAddr> + '_ {
        self.entries.iter().map(ResolverEntry::endpoint)
    }

    /// Whether both values share the same snapshot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<'a> IntoIterator for &'a ResolverResults {
    type Item = &'a ResolverEntry;
    type IntoIter = slice::Iter<'a, ResolverEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
