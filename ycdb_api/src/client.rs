//! HTTP client for the company directory site.

use std::time::Duration;

use url::Url;

use crate::{
    query::{ListingQuery, Query},
    user_agent::get_user_agent,
    Error,
};

/// Production directory site.
pub const DEFAULT_BASE_URL: &str = "https://www.ycdb.co";

/// Per-request timeout used unless [`Client::with_timeout`] overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the directory's listing and detail pages.
///
/// Sends requests with browser-like headers and a randomized user agent.
/// Each request builds a fresh `reqwest::Client` with the configured timeout.
/// Pages are returned as raw HTML; parsing is the caller's job.
#[derive(Clone, Debug)]
pub struct Client {
    /// Base URL for the site, without a trailing slash.
    base_url: String,
    timeout: Duration,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production directory site.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn root_url(&self) -> Result<Url, Error> {
        Url::parse(&format!("{}/", self.base_url)).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_url, e);
            Error::InvalidUrl(format!("{}: {}", self.base_url, e))
        })
    }

    /// URL of one listing page: `<base>/?page=N`.
    pub fn listing_url(&self, query: &ListingQuery) -> Result<Url, Error> {
        Ok(query.add_to_url(&self.root_url()?))
    }

    /// URL of a company's detail page: `<base>/companies/<slug>`.
    ///
    /// The slug is pushed as one path segment, so `/`, `?` and `#` inside it
    /// are percent-encoded rather than changing the path.
    pub fn company_url(&self, slug: &str) -> Result<Url, Error> {
        let mut url = self.root_url()?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("companies")
            .push(slug);
        Ok(url)
    }

    async fn get_html(&self, url: Url) -> Result<String, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        tracing::debug!("GET {}", url);
        let resp = client
            .get(url.clone())
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get {}: {}", url, e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("GET {} failed with status {}: {}", url, status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Fetches one listing page as HTML.
    pub async fn get_listing_page(&self, query: &ListingQuery) -> Result<String, Error> {
        let url = self.listing_url(query)?;
        self.get_html(url).await
    }

    /// Fetches a company's detail page as HTML, addressed by its slug.
    pub async fn get_company_page(&self, slug: &str) -> Result<String, Error> {
        let url = self.company_url(slug)?;
        self.get_html(url).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_url_has_page() {
        let client = Client::with_base_url("https://example.com/");
        let url = client.listing_url(&ListingQuery::page(4)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/?page=4");
    }

    #[test]
    fn company_url_appends_segment() {
        let client = Client::with_base_url("https://example.com");
        let url = client.company_url("acme-corp").unwrap();
        assert_eq!(url.as_str(), "https://example.com/companies/acme-corp");
    }

    #[test]
    fn company_url_keeps_base_path() {
        let client = Client::with_base_url("https://example.com/mirror/");
        let url = client.company_url("acme").unwrap();
        assert_eq!(url.as_str(), "https://example.com/mirror/companies/acme");
    }

    #[test]
    fn company_url_encodes_reserved_chars() {
        let client = Client::with_base_url("https://example.com");
        let url = client.company_url("a/b?c").unwrap();
        assert_eq!(url.as_str(), "https://example.com/companies/a%2Fb%3Fc");
    }

    #[test]
    fn invalid_base_url() {
        let client = Client::with_base_url("not a url");
        assert!(matches!(
            client.listing_url(&ListingQuery::default()),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn truncate_respects_char_boundary() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
    }

    #[test]
    fn default_timeout() {
        assert_eq!(Client::new().timeout(), DEFAULT_TIMEOUT);
        let client = Client::new().with_timeout(Duration::from_secs(5));
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }
}
