//! Error types for the library layer.

use std::fmt;

use crate::scrape::ScrapeError;

/// Errors produced by the library layer, wrapping scrape failures and
/// adding input validation failures.
#[derive(Debug)]
pub enum YcdbError {
    /// Fetching or parsing a page failed. Aborts the whole scrape.
    Scrape(ScrapeError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for YcdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scrape(e) => write!(f, "Scrape error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for YcdbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Scrape(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<ScrapeError> for YcdbError {
    fn from(e: ScrapeError) -> Self {
        Self::Scrape(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn display_invalid_input() {
        let err = YcdbError::InvalidInput("bad size".into());
        assert_eq!(err.to_string(), "Invalid input: bad size");
        assert!(err.source().is_none());
    }

    #[test]
    fn scrape_error_wraps_with_source() {
        let err: YcdbError = ScrapeError::Markup("no blocks".into()).into();
        assert!(matches!(err, YcdbError::Scrape(ScrapeError::Markup(_))));
        assert_eq!(err.to_string(), "Scrape error: unexpected markup: no blocks");
        assert!(err.source().is_some());
    }
}
