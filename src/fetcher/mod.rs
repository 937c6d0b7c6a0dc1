//! Fetcher capability for retrieving pages and their outbound links
//!
//! Everything the engines know about the network lives behind the [`Fetcher`]
//! trait: given a URL, produce the page body and the URLs it links to, or
//! fail. Two implementations are provided:
//! - [`HttpFetcher`]: real HTTP fetching over reqwest with HTML link
//!   extraction
//! - [`FakeFetcher`]: canned in-memory results for tests and offline use

mod fake;
mod http;
mod parser;

pub use fake::FakeFetcher;
pub use http::{build_http_client, HttpFetcher};
pub use parser::extract_links;

use async_trait::async_trait;
use thiserror::Error;

/// A successfully fetched page: its body and the URLs it links to
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Raw page body
    pub body: String,

    /// Outbound links, absolute, in document order
    pub links: Vec<String>,
}

/// Per-URL fetch failure
///
/// Always local to the URL that failed: the engines turn it into a recorded
/// outcome and never let it abort sibling tasks.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Not found: {url}")]
    NotFound { url: String },
}

impl FetchError {
    /// The URL this failure belongs to
    pub fn url(&self) -> &str {
        match self {
            FetchError::Http { url, .. }
            | FetchError::Network { url, .. }
            | FetchError::Timeout { url }
            | FetchError::NotFound { url } => url,
        }
    }
}

/// Polymorphic fetch capability consumed by both engines
///
/// Implementations must be shareable across concurrently spawned tasks.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, returning its body and the URLs found on the page
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
