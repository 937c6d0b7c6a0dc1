//! Link extraction from HTML bodies
//!
//! Pulls `<a href>` targets out of a fetched page and resolves them against
//! the page URL so the engines only ever see absolute URLs.

use scraper::{Html, Selector};
use url::Url;

/// Extracts all followable links from an HTML document
///
/// Relative hrefs are resolved against `base_url`. Links that cannot lead to
/// another page are skipped:
/// - `javascript:`, `mailto:`, `tel:`, `data:` schemes
/// - fragment-only anchors
/// - `<a ... download>` targets
/// - anything that is not http(s) after resolution
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, base_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute http(s) URL, or None if it should be skipped
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
