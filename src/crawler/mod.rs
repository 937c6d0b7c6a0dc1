//! Crawl engines and their shared state
//!
//! This module contains the two concurrency strategies for URL discovery:
//! - recursive depth-bounded traversal with unbounded fan-out
//! - fixed-size batch fetching over a stream of URLs
//!
//! plus the [`VisitedSet`] that keeps the recursive engine from fetching any
//! URL twice.

mod batch;
mod recursive;
mod visited;

pub use batch::run_batch;
pub use recursive::RecursiveCrawler;
pub use visited::VisitedSet;
