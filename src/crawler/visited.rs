//! Deduplication set shared by all tasks of one crawl run

use std::collections::HashSet;
use std::sync::Mutex;

/// Concurrency-safe set of URLs already claimed for fetching
///
/// The whole contract is [`claim`](VisitedSet::claim): an atomic
/// check-and-mark in a single critical section. Callers never get separate
/// check and mark operations, so two racing tasks can never both observe a
/// URL as absent. Membership is monotonic; there is no removal.
///
/// The lock is held only for the O(1) claim itself, never across a fetch.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically tests membership and, if absent, inserts the URL
    ///
    /// Returns true exactly once per URL for the lifetime of the set:
    /// the caller that gets true owns the fetch, everyone else skips.
    pub fn claim(&self, url: &str) -> bool {
        self.urls.lock().unwrap().insert(url.to_string())
    }

    /// Whether the URL has been claimed
    pub fn contains(&self, url: &str) -> bool {
        self.urls.lock().unwrap().contains(url)
    }

    /// Number of claimed URLs
    pub fn len(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
