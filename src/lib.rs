//! Linkscout: a concurrent URL-discovery engine
//!
//! This crate fetches URLs through a pluggable [`Fetcher`](fetcher::Fetcher)
//! capability and discovers new URLs from the links each page carries. Two
//! engines are provided:
//!
//! - [`crawler::RecursiveCrawler`]: depth-bounded recursive traversal with
//!   unbounded fan-out and a shared, deduplicating visited set
//! - [`crawler::run_batch`]: a fixed-size pool that fetches a stream of URLs
//!   in batches of at most K concurrent tasks

pub mod crawler;
pub mod fetcher;
pub mod sink;

use thiserror::Error;

/// Main error type for linkscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read input stream: {0}")]
    Input(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid match pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Concurrency limit must be at least 1")]
    InvalidConcurrency,
}

/// Result type alias for linkscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

// Re-export commonly used types
pub use crawler::{run_batch, RecursiveCrawler, VisitedSet};
pub use fetcher::{FetchError, FetchedPage, Fetcher};
pub use sink::{FetchRecord, ResultSink};
