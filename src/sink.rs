//! Result collection for both engines
//!
//! Every attempted URL yields exactly one [`FetchRecord`], handed to a shared
//! [`ResultSink`]. The sink is append-only and thread-safe; arrival order
//! follows fetch completion, not discovery order.

use crate::fetcher::{FetchError, FetchedPage};
use std::sync::Mutex;

/// Outcome of one fetch attempt
///
/// Immutable after creation. Exactly one of `body`/`error` is set.
#[derive(Debug)]
pub struct FetchRecord {
    /// The URL that was attempted
    pub url: String,

    /// Page body, on success
    pub body: Option<String>,

    /// Outbound links discovered on the page
    pub links: Vec<String>,

    /// Pattern match count, when the batch engine ran with a pattern
    pub matches: Option<usize>,

    /// The failure, on error
    pub error: Option<FetchError>,
}

impl FetchRecord {
    /// Builds a success record from a fetched page
    pub fn success(url: String, page: FetchedPage) -> Self {
        Self {
            url,
            body: Some(page.body),
            links: page.links,
            matches: None,
            error: None,
        }
    }

    /// Builds a failure record carrying the fetch error
    pub fn failure(url: String, error: FetchError) -> Self {
        Self {
            url,
            body: None,
            links: Vec::new(),
            matches: None,
            error: Some(error),
        }
    }

    /// Attaches a derived match count, builder-style
    pub fn with_matches(mut self, matches: usize) -> Self {
        self.matches = Some(matches);
        self
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Thread-safe accumulator of fetch outcomes
///
/// `record` never drops or duplicates: every call appends exactly one record.
#[derive(Debug, Default)]
pub struct ResultSink {
    records: Mutex<Vec<FetchRecord>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome and emits it on the log as it arrives
    pub fn record(&self, record: FetchRecord) {
        match &record.error {
            None => tracing::info!("found: {} ({} links)", record.url, record.links.len()),
            Some(e) => tracing::warn!("failed: {}", e),
        }
        self.records.lock().unwrap().push(record);
    }

    /// Takes all accumulated records, leaving the sink empty
    pub fn drain(&self) -> Vec<FetchRecord> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }

    /// Number of records accumulated so far
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
