//! Canned in-memory fetcher for tests and offline runs
//!
//! Serves a fixed mapping from URL to (body, links) and fails with
//! [`FetchError::NotFound`] for anything else. Every call is counted per URL
//! so tests can assert that the engines fetch each URL exactly once.

use crate::fetcher::{FetchError, FetchedPage, Fetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Fetcher returning canned results from an in-memory page map
#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FetchedPage>,
    fetch_counts: Mutex<HashMap<String, usize>>,
}

impl FakeFetcher {
    /// Creates an empty fetcher; every fetch fails with `NotFound`
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canned page, builder-style
    pub fn page(mut self, url: &str, body: &str, links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                body: body.to_string(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    /// How many times `url` has been fetched
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetch_counts
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of fetch calls across all URLs
    pub fn total_fetches(&self) -> usize {
        self.fetch_counts.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        {
            let mut counts = self.fetch_counts.lock().unwrap();
            *counts.entry(url.to_string()).or_insert(0) += 1;
        }

        // Yield so concurrently dispatched fetches interleave like real I/O
        tokio::task::yield_now().await;

        match self.pages.get(url) {
            Some(page) => Ok(page.clone()),
            None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}
