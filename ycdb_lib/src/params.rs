//! Raw scrape request parameters, as they arrive in a query string.

use serde::Deserialize;

use crate::error::YcdbError;
use crate::filter::CompanyFilter;
use crate::validation;

/// The allow-listed parameters of a scrape request. Every field is the raw
/// string value; anything not named here is ignored on deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapeParams {
    pub n: Option<String>,
    pub batch: Option<String>,
    pub industry: Option<String>,
    pub region: Option<String>,
    pub tag: Option<String>,
    pub company_size: Option<String>,
    pub top_companies: Option<String>,
    pub is_hiring: Option<String>,
    pub nonprofit: Option<String>,
    pub black_founded: Option<String>,
    pub hispanic_latino_founded: Option<String>,
    pub women_founded: Option<String>,
}

impl ScrapeParams {
    /// Requested record count, defaulting per [`validation::validate_count`].
    pub fn count(&self) -> usize {
        validation::validate_count(self.n.as_deref())
    }

    /// Validates the filter parameters into a [`CompanyFilter`].
    pub fn filter(&self) -> Result<CompanyFilter, YcdbError> {
        Ok(CompanyFilter {
            batch: validation::validate_filter_text(self.batch.as_deref())?,
            industry: validation::validate_filter_text(self.industry.as_deref())?,
            region: validation::validate_filter_text(self.region.as_deref())?,
            tag: validation::validate_filter_text(self.tag.as_deref())?,
            company_size: validation::validate_company_size(self.company_size.as_deref())?,
            top_companies: validation::validate_flag(
                "top_companies",
                self.top_companies.as_deref(),
            )?,
            is_hiring: validation::validate_flag("is_hiring", self.is_hiring.as_deref())?,
            nonprofit: validation::validate_flag("nonprofit", self.nonprofit.as_deref())?,
            black_founded: validation::validate_flag(
                "black_founded",
                self.black_founded.as_deref(),
            )?,
            hispanic_latino_founded: validation::validate_flag(
                "hispanic_latino_founded",
                self.hispanic_latino_founded.as_deref(),
            )?,
            women_founded: validation::validate_flag(
                "women_founded",
                self.women_founded.as_deref(),
            )?,
        })
    }
}
