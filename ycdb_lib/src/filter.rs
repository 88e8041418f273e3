//! Filter criteria applied to listing entries before the detail fetch.

use std::fmt;
use std::str::FromStr;

use ycdb_api::types::{Badge, ListingEntry};

use crate::error::YcdbError;

/// Named optional constraints for one scrape.
///
/// String criteria compare case-insensitively after trimming. An unset
/// criterion, or a flag left `false`, never rejects an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    /// Exact match against the listing's batch label.
    pub batch: Option<String>,
    /// Substring match against any of the listing's industries.
    pub industry: Option<String>,
    /// Substring match against the listing's location.
    pub region: Option<String>,
    /// Exact match against any of the listing's tags.
    pub tag: Option<String>,
    /// Team size must fall inside this range. Entries without a team size
    /// are rejected.
    pub company_size: Option<CompanySize>,
    /// Require the "Top Company" badge.
    pub top_companies: bool,
    /// Require the "Hiring" badge.
    pub is_hiring: bool,
    /// Require the "Nonprofit" badge.
    pub nonprofit: bool,
    /// Require the "Black-founded" badge.
    pub black_founded: bool,
    /// Require the "Hispanic & Latino-founded" badge.
    pub hispanic_latino_founded: bool,
    /// Require the "Women-founded" badge.
    pub women_founded: bool,
}

impl CompanyFilter {
    /// True when no criterion is set, i.e. every entry passes.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Badges an entry must carry to pass.
    pub fn required_badges(&self) -> Vec<Badge> {
        [
            (self.top_companies, Badge::TopCompany),
            (self.is_hiring, Badge::Hiring),
            (self.nonprofit, Badge::Nonprofit),
            (self.black_founded, Badge::BlackFounded),
            (self.hispanic_latino_founded, Badge::HispanicLatinoFounded),
            (self.women_founded, Badge::WomenFounded),
        ]
        .into_iter()
        .filter_map(|(set, badge)| set.then_some(badge))
        .collect()
    }

    /// Filter predicate: true when `entry` satisfies every set criterion.
    pub fn matches(&self, entry: &ListingEntry) -> bool {
        if let Some(ref batch) = self.batch {
            if !eq_ignore_case(&entry.batch, batch) {
                return false;
            }
        }

        if let Some(ref industry) = self.industry {
            let needle = industry.trim().to_lowercase();
            if !entry
                .industries
                .iter()
                .any(|i| i.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if let Some(ref region) = self.region {
            let needle = region.trim().to_lowercase();
            if !entry.location.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(ref tag) = self.tag {
            if !entry.tags.iter().any(|t| eq_ignore_case(t, tag)) {
                return false;
            }
        }

        if let Some(size) = self.company_size {
            match entry.team_size {
                Some(n) if size.contains(n) => {}
                _ => return false,
            }
        }

        self.required_badges()
            .into_iter()
            .all(|badge| entry.has_badge(badge))
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Inclusive team-size range: `1-10`, `500+`, or a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompanySize {
    pub min: u32,
    /// `None` means unbounded.
    pub max: Option<u32>,
}

impl CompanySize {
    pub fn contains(&self, team_size: u32) -> bool {
        team_size >= self.min && self.max.map_or(true, |max| team_size <= max)
    }
}

impl FromStr for CompanySize {
    type Err = YcdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            YcdbError::InvalidInput(format!(
                "invalid company size '{}'. Expected a range like 1-10, an open range like 500+, or a number",
                s
            ))
        };
        let parse = |raw: &str| raw.trim().replace(',', "").parse::<u32>().map_err(|_| invalid());

        let trimmed = s.trim();
        if let Some(min) = trimmed.strip_suffix('+') {
            return Ok(CompanySize {
                min: parse(min)?,
                max: None,
            });
        }
        if let Some((min, max)) = trimmed.split_once('-') {
            let (min, max) = (parse(min)?, parse(max)?);
            if min > max {
                return Err(YcdbError::InvalidInput(format!(
                    "company size '{}': lower bound exceeds upper bound",
                    s
                )));
            }
            return Ok(CompanySize {
                min,
                max: Some(max),
            });
        }
        let exact = parse(trimmed)?;
        Ok(CompanySize {
            min: exact,
            max: Some(exact),
        })
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            None => write!(f, "{}+", self.min),
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{}-{}", self.min, max),
        }
    }
}
