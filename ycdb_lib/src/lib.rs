//! Library layer for the ycdb scraper: HTML extraction, filter criteria,
//! the paginating collector, and input validation.
//!
//! Wraps the `ycdb_api` transport crate, which only knows how to fetch
//! listing and detail pages as raw HTML.

pub mod collect;
pub mod error;
pub mod filter;
pub mod params;
pub mod scrape;
pub mod validation;

pub use ycdb_api;
pub use ycdb_api::types;

pub use collect::{collect_companies, scrape_companies, CompanySource, ListingCursor};
pub use error::YcdbError;
pub use filter::{CompanyFilter, CompanySize};
pub use params::ScrapeParams;
pub use scrape::{parse_company_detail, parse_listing_page, ScrapeClient, ScrapeError, ScrapePage};
