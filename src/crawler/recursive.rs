//! Recursive crawl engine with unbounded fan-out
//!
//! Starting from a seed URL, each task claims its URL against the shared
//! [`VisitedSet`], fetches it, records the outcome, and spawns one new task
//! per discovered link with a decremented depth budget. Completion of the
//! whole task tree is tracked by a waitgroup built on an mpsc channel: every
//! task holds a guard (a cloned sender), and the top-level call finishes when
//! the last guard drops.

use crate::crawler::VisitedSet;
use crate::fetcher::{FetchError, FetchedPage, Fetcher};
use crate::sink::{FetchRecord, ResultSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Depth-bounded recursive crawler
///
/// Cheap to share: the fetcher, sink, and visited set all live behind `Arc`.
pub struct RecursiveCrawler<F> {
    fetcher: Arc<F>,
    sink: Arc<ResultSink>,
    visited: Arc<VisitedSet>,
    fetch_timeout: Option<Duration>,
}

/// State shared by every task of one crawl run
struct CrawlContext<F> {
    fetcher: Arc<F>,
    sink: Arc<ResultSink>,
    visited: Arc<VisitedSet>,
    fetch_timeout: Option<Duration>,
}

/// Completion guard held by each in-flight task
///
/// Cloning the guard registers a child with the outstanding-work tracker
/// before the child task is spawned, so the tracker can never observe zero
/// while work is still pending. Dropping it signals completion on every exit
/// path, including panic and cancellation.
#[derive(Clone)]
struct TaskGuard {
    _done: mpsc::Sender<()>,
}

impl<F: Fetcher + 'static> RecursiveCrawler<F> {
    /// Creates a crawler with a fresh visited set
    pub fn new(fetcher: Arc<F>, sink: Arc<ResultSink>) -> Self {
        Self {
            fetcher,
            sink,
            visited: Arc::new(VisitedSet::new()),
            fetch_timeout: None,
        }
    }

    /// Bounds each individual fetch, builder-style
    ///
    /// A fetch that exceeds the limit is recorded as a timeout failure for
    /// that URL; the rest of the crawl is unaffected.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.fetch_timeout = Some(limit);
        self
    }

    /// The set of URLs claimed so far
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Crawls from `seed` up to `depth`, returning once the whole task tree
    /// has completed
    ///
    /// `depth` counts fetches along a path: 0 fetches nothing, 1 fetches only
    /// the seed. Per-URL failures are recorded in the sink and never abort
    /// sibling tasks.
    pub async fn crawl(&self, seed: &str, depth: u32) {
        let (done_tx, mut done_rx) = mpsc::channel::<()>(1);

        let ctx = Arc::new(CrawlContext {
            fetcher: self.fetcher.clone(),
            sink: self.sink.clone(),
            visited: self.visited.clone(),
            fetch_timeout: self.fetch_timeout,
        });

        spawn_task(ctx, seed.to_string(), depth, TaskGuard { _done: done_tx });

        // All senders live in task guards now; recv yields None once the
        // last task has dropped its guard.
        let _ = done_rx.recv().await;
        tracing::debug!("crawl complete: {} URLs claimed", self.visited.len());
    }
}

/// Spawns one crawl task for `url`
///
/// Not async itself, so tasks can recurse through it without boxing.
fn spawn_task<F: Fetcher + 'static>(
    ctx: Arc<CrawlContext<F>>,
    url: String,
    depth: u32,
    guard: TaskGuard,
) {
    tokio::spawn(async move {
        // Held until this task and nothing else is done with it
        let guard = guard;

        if depth == 0 {
            return;
        }

        // Atomic check-and-mark; the losing side of a race skips the URL.
        // The claim lock is released before the fetch starts.
        if !ctx.visited.claim(&url) {
            tracing::trace!("already claimed, skipping: {}", url);
            return;
        }

        match fetch_with_timeout(&ctx, &url).await {
            Ok(page) => {
                let links = page.links.clone();
                ctx.sink.record(FetchRecord::success(url, page));

                for link in links {
                    // Register the child before spawning it so the parent's
                    // completion can never race ahead of the count.
                    let child_guard = guard.clone();
                    spawn_task(ctx.clone(), link, depth - 1, child_guard);
                }
            }
            Err(error) => {
                ctx.sink.record(FetchRecord::failure(url, error));
            }
        }
    });
}

/// Invokes the fetcher, applying the configured per-fetch timeout if any
async fn fetch_with_timeout<F: Fetcher>(
    ctx: &CrawlContext<F>,
    url: &str,
) -> Result<FetchedPage, FetchError> {
    match ctx.fetch_timeout {
        Some(limit) => match tokio::time::timeout(limit, ctx.fetcher.fetch(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
            }),
        },
        None => ctx.fetcher.fetch(url).await,
    }
}
