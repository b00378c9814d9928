//! Single-pass forward iterator over a resolved snapshot
//!
//! The iterator owns a share of the snapshot and its own cursor. Copies
//! advance independently; the entries are never copied.

use std::ops::Deref;

use mplex_io::{ResolverEntry, ResolverResults};

/// Cursor into a `ResolverResults` snapshot.
///
/// Two iterators are equal when both are at the end, or when they point into
/// the same snapshot at the same position. `ResolverIterator::default()` is
/// the end.
#[derive(Debug, Clone)]
pub struct ResolverIterator {
    results: Option<ResolverResults>,
    position: usize,
    at_end: bool,
}

impl Default for ResolverIterator {
    fn default() -> Self {
        Self {
            results: None,
            position: 0,
            at_end: true,
        }
    }
}

impl ResolverIterator {
    /// Iterator at the first entry, or at the end if there is none.
    #[must_use]
    pub fn new(results: ResolverResults) -> Self {
        let at_end = results.is_empty();
        Self {
            results: Some(results),
            position: 0,
            at_end,
        }
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.at_end
    }

    /// The current entry, `None` at the end.
    #[must_use]
    pub fn entry(&self) -> Option<&ResolverEntry> {
        if self.at_end {
            return None;
        }
        self.results.as_ref()?.get(self.position)
    }

    /// Pre-increment. Does nothing at the end.
    pub fn advance(&mut self) -> &mut Self {
        if self.at_end {
            return self;
        }
        self.position += 1;
        let len = self.results.as_ref().map_or(0, ResolverResults::len);
        if self.position >= len {
            self.at_end = true;
        }
        self
    }

    /// Post-increment: advances and returns the iterator as it was.
    #[must_use = "use `advance` if the previous position is not needed"]
    pub fn post_advance(&mut self) -> Self {
        let previous = self.clone();
        self.advance();
        previous
    }

    fn remaining(&self) -> usize {
        if self.at_end {
            return 0;
        }
        self.results
            .as_ref()
            .map_or(0, |results| results.len() - self.position)
    }
}

impl Deref for ResolverIterator {
    type Target = ResolverEntry;

    /// # Panics
    ///
    /// At the end. Compare against `ResolverIterator::default()` or use
    /// [`ResolverIterator::entry`] first.
    fn deref(&self) -> &ResolverEntry {
        match self.entry() {
            Some(entry) => entry,
            None => panic!("dereferenced a resolver iterator at its end"),
        }
    }
}

impl PartialEq for ResolverIterator {
    fn eq(&self, other: &Self) -> bool {
        match (self.at_end, other.at_end) {
            (true, true) => true,
            (false, false) => match (&self.results, &other.results) {
                (Some(a), Some(b)) => a.ptr_eq(b) && self.position == other.position,
                _ => false,
            },
            _ => false,
        }
    }
}

impl Eq for ResolverIterator {}

impl Iterator for ResolverIterator {
    type Item = ResolverEntry;

    fn next(&mut self) -> Option<ResolverEntry> {
        let entry = self.entry().cloned();
        self.advance();
        entry
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ResolverIterator {}

impl std::iter::FusedIterator for ResolverIterator {}
