//! Paginating collector: walks listing pages lazily, filters entries, and
//! enriches the accepted ones with their detail page.

use std::collections::{HashSet, VecDeque};
use std::future::Future;

use ycdb_api::types::{Company, CompanyDetail, ListingEntry};

use crate::error::YcdbError;
use crate::filter::CompanyFilter;
use crate::params::ScrapeParams;
use crate::scrape::{ScrapeClient, ScrapeError, ScrapePage};

/// Where listing pages and detail pages come from. [`ScrapeClient`] is the
/// HTTP implementation.
pub trait CompanySource {
    /// Listing page `page` (1-indexed). An empty `data` means the listing
    /// has run out.
    fn listing_page(
        &self,
        page: i64,
    ) -> impl Future<Output = Result<ScrapePage<ListingEntry>, ScrapeError>> + Send;

    /// Detail page for the company called `name`.
    fn company_detail(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<CompanyDetail, ScrapeError>> + Send;
}

impl CompanySource for ScrapeClient {
    async fn listing_page(&self, page: i64) -> Result<ScrapePage<ListingEntry>, ScrapeError> {
        ScrapeClient::listing_page(self, page).await
    }

    async fn company_detail(&self, name: &str) -> Result<CompanyDetail, ScrapeError> {
        ScrapeClient::company_detail(self, name).await
    }
}

/// Lazy stream of listing entries across page boundaries.
///
/// A page is fetched only when the entries of the previous one are used up
/// and the caller asks for another. The first page that yields no new
/// entries ends the stream: either it is empty, or every entry on it was
/// already yielded by an earlier page (sites that answer an out-of-range
/// page with the last page again).
pub struct ListingCursor<'a, S> {
    source: &'a S,
    next_page: i64,
    buffer: VecDeque<ListingEntry>,
    seen: HashSet<ListingEntry>,
    exhausted: bool,
    pages_fetched: usize,
}

impl<'a, S: CompanySource> ListingCursor<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            next_page: 1,
            buffer: VecDeque::new(),
            seen: HashSet::new(),
            exhausted: false,
            pages_fetched: 0,
        }
    }

    /// Next listing entry, or `None` once a page with no new entries has
    /// been seen.
    pub async fn next_entry(&mut self) -> Result<Option<ListingEntry>, ScrapeError> {
        loop {
            if let Some(entry) = self.buffer.pop_front() {
                return Ok(Some(entry));
            }
            if self.exhausted {
                return Ok(None);
            }

            let page = self.source.listing_page(self.next_page).await?;
            self.pages_fetched += 1;
            if page.data.is_empty() {
                tracing::info!("Listing page {} is empty, stopping", self.next_page);
                self.exhausted = true;
                return Ok(None);
            }
            if page.data.iter().all(|entry| self.seen.contains(entry)) {
                tracing::info!(
                    "Listing page {} repeats earlier entries, stopping",
                    self.next_page
                );
                self.exhausted = true;
                return Ok(None);
            }
            self.seen.extend(page.data.iter().cloned());
            self.buffer.extend(page.data);
            self.next_page += 1;
        }
    }

    /// Number of listing pages requested so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

/// Collects up to `target` companies that pass `filter`, in listing order.
///
/// Rejected entries are skipped without a detail fetch. Collection stops as
/// soon as `target` companies are in hand, or when the listing runs out.
/// Any fetch or parse error aborts the whole collection.
pub async fn collect_companies<S: CompanySource>(
    source: &S,
    target: usize,
    filter: &CompanyFilter,
) -> Result<Vec<Company>, ScrapeError> {
    let mut cursor = ListingCursor::new(source);
    let mut companies = Vec::new();
    let mut skipped = 0usize;

    while companies.len() < target {
        let Some(entry) = cursor.next_entry().await? else {
            break;
        };
        if !filter.matches(&entry) {
            tracing::debug!("Skipping {}: rejected by filter", entry.name);
            skipped += 1;
            continue;
        }
        let detail = source.company_detail(&entry.name).await?;
        companies.push(Company::from_listing(entry, detail));
    }

    companies.truncate(target);
    tracing::info!(
        "Collected {} of {} requested companies ({} pages, {} skipped by filter)",
        companies.len(),
        target,
        cursor.pages_fetched(),
        skipped
    );
    Ok(companies)
}

/// Validates raw request parameters and runs [`collect_companies`] with them.
///
/// Invalid parameters fail with [`YcdbError::InvalidInput`] before any page
/// is fetched; fetch and parse failures come back as [`YcdbError::Scrape`].
pub async fn scrape_companies<S: CompanySource>(
    source: &S,
    params: &ScrapeParams,
) -> Result<Vec<Company>, YcdbError> {
    let filter = params.filter()?;
    let target = params.count();
    Ok(collect_companies(source, target, &filter).await?)
}
