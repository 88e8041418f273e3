use url::Url;

use super::common::{Query, QueryCommon};

/// Query for one page of the company listing (`/?page=N`).
///
/// The directory site takes no server-side filters; filtering happens after
/// extraction.
#[derive(Default, Clone, Copy)]
pub struct ListingQuery {
    pub common: QueryCommon,
}

impl Query for ListingQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}

impl ListingQuery {
    /// Shorthand for `ListingQuery::default().with_page(page)`.
    pub fn page(page: i64) -> Self {
        Self::default().with_page(page)
    }

    /// Currently requested page number.
    pub fn page_number(&self) -> i64 {
        self.common.page
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{ListingQuery, Query};

    #[test]
    fn test_listing_query() {
        let url = Url::parse("https://example.com/").unwrap();

        insta::assert_snapshot!(
            ListingQuery::default().add_to_url(&url).to_string(),
            @"https://example.com/?page=1"
        );

        insta::assert_snapshot!(
            ListingQuery::default().with_page(7).add_to_url(&url).to_string(),
            @"https://example.com/?page=7"
        );
    }

    #[test]
    fn page_shorthand() {
        assert_eq!(ListingQuery::page(3).page_number(), 3);
        assert_eq!(ListingQuery::default().page_number(), 1);
    }
}
