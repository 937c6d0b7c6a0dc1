//! HTTP fetcher implementation
//!
//! Fetches pages over reqwest and classifies failures into the
//! [`FetchError`] taxonomy:
//! - non-2xx status → `Http`
//! - timeout → `Timeout`
//! - connection refused and other transport failures → `Network`
//!
//! Link extraction runs only on bodies served as `text/html`; any other
//! content type yields the body with an empty link list.

use crate::fetcher::{extract_links, FetchError, FetchedPage, Fetcher};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Builds an HTTP client with the settings the crawler relies on
///
/// Redirects are followed up to 10 hops; requests time out after 30 seconds
/// and connection attempts after 10.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Real network fetcher backed by a shared reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Final URL after redirects is the base for resolving relative links
        let final_url = response.url().clone();

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let links = if content_type.contains("text/html") {
            extract_links(&body, &final_url)
        } else {
            Vec::new()
        };

        Ok(FetchedPage { body, links })
    }
}

/// Maps a reqwest transport error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
