//! Company records extracted from listing and detail pages.

use serde::{Deserialize, Serialize};

/// A person listed in the founders section of a company's detail page.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Founder {
    /// Display name, whitespace-trimmed.
    pub name: String,

    /// LinkedIn profile URL, when the page links one.
    pub linkedin: Option<String>,
}

/// Marker shown on a listing entry.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    TopCompany,
    Hiring,
    Nonprofit,
    BlackFounded,
    HispanicLatinoFounded,
    WomenFounded,
}

impl Badge {
    /// Maps the visible badge text to a [`Badge`]. Case, spacing and
    /// punctuation are ignored, so `"Hispanic & Latino-founded"` and
    /// `"hispanic latino founded"` are the same badge.
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "topcompany" | "topcompanies" => Some(Badge::TopCompany),
            "hiring" | "ishiring" | "nowhiring" => Some(Badge::Hiring),
            "nonprofit" => Some(Badge::Nonprofit),
            "blackfounded" => Some(Badge::BlackFounded),
            "hispaniclatinofounded" | "latinofounded" | "hispanicfounded" => {
                Some(Badge::HispanicLatinoFounded)
            }
            "womenfounded" | "womanfounded" => Some(Badge::WomenFounded),
            _ => None,
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Badge::TopCompany => "top_company",
                Badge::Hiring => "hiring",
                Badge::Nonprofit => "nonprofit",
                Badge::BlackFounded => "black_founded",
                Badge::HispanicLatinoFounded => "hispanic_latino_founded",
                Badge::WomenFounded => "women_founded",
            }
        )
    }
}

/// One company block from a listing page, before the detail fetch.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ListingEntry {
    /// Company display name. Never empty.
    pub name: String,

    /// Free-text location, possibly empty.
    pub location: String,

    /// One-line description, possibly empty.
    pub description: String,

    /// Batch label (e.g. "W21"), possibly empty.
    pub batch: String,

    /// Industry labels in page order.
    #[serde(default)]
    pub industries: Vec<String>,

    /// Tag labels in page order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Team size, when the listing shows one.
    #[serde(default)]
    pub team_size: Option<u32>,

    /// Recognized badges in page order.
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl ListingEntry {
    pub fn has_badge(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }
}

/// Website and founders taken from a company's detail page.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompanyDetail {
    pub website: Option<String>,
    pub founders: Vec<Founder>,
}

/// A fully enriched company record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub location: String,
    pub description: String,
    pub batch: String,
    pub website: Option<String>,
    pub founders: Vec<Founder>,
}

impl Company {
    /// Combines a listing entry with its detail page. Listing-only attributes
    /// (industries, tags, team size, badges) are dropped.
    pub fn from_listing(entry: ListingEntry, detail: CompanyDetail) -> Self {
        Self {
            name: entry.name,
            location: entry.location,
            description: entry.description,
            batch: entry.batch,
            website: detail.website,
            founders: detail.founders,
        }
    }

    /// Founder names in page order.
    pub fn founder_names(&self) -> Vec<&str> {
        self.founders.iter().map(|f| f.name.as_str()).collect()
    }

    /// LinkedIn URLs of the founders that have one, in page order.
    pub fn linkedin_urls(&self) -> Vec<&str> {
        self.founders
            .iter()
            .filter_map(|f| f.linkedin.as_deref())
            .collect()
    }
}
