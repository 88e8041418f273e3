//! HTML scraping for the directory's listing and detail pages.

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use ycdb_api::types::{Badge, CompanyDetail, Founder, ListingEntry};
use ycdb_api::{company_slug, Client, ListingQuery};

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("http error: {0}")]
    Http(#[from] ycdb_api::Error),
    #[error("invalid selector {selector:?}: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
    #[error("unexpected markup: {0}")]
    Markup(String),
}

/// One fetched listing page.
#[derive(Debug)]
pub struct ScrapePage<T> {
    /// Page number this data came from (1-indexed).
    pub page: i64,
    pub data: Vec<T>,
}

/// Fetches and parses directory pages. Holds no state besides the
/// transport configuration, so one instance can serve many scrapes.
#[derive(Clone, Debug, Default)]
pub struct ScrapeClient {
    api: Client,
}

impl ScrapeClient {
    pub fn new() -> Self {
        Self { api: Client::new() }
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api: Client::with_base_url(base_url),
        }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            api: self.api.with_timeout(timeout),
        }
    }

    pub fn api(&self) -> &Client {
        &self.api
    }

    /// Fetches listing page `page` and extracts its company blocks.
    pub async fn listing_page(&self, page: i64) -> Result<ScrapePage<ListingEntry>, ScrapeError> {
        let html = self.api.get_listing_page(&ListingQuery::page(page)).await?;
        let data = parse_listing_page(&html).map_err(|e| {
            tracing::error!("Listing page {}: {}", page, e);
            e
        })?;
        tracing::debug!("Listing page {}: {} company blocks", page, data.len());
        Ok(ScrapePage { page, data })
    }

    /// Fetches and parses the detail page for `name`, addressed by
    /// [`company_slug`].
    pub async fn company_detail(&self, name: &str) -> Result<CompanyDetail, ScrapeError> {
        let slug = company_slug(name);
        let html = self.api.get_company_page(&slug).await?;
        let detail = parse_company_detail(&html)?;
        tracing::debug!(
            "Detail {}: website={} founders={}",
            slug,
            detail.website.is_some(),
            detail.founders.len()
        );
        Ok(detail)
    }
}

fn selector(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css,
        message: format!("{:?}", e),
    })
}

/// Concatenated text of every element under `root` matching `sel`, trimmed.
fn text_of(root: ElementRef<'_>, sel: &Selector) -> String {
    root.select(sel)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trimmed text of each matching element, skipping empty ones.
fn texts_of(root: ElementRef<'_>, sel: &Selector) -> Vec<String> {
    root.select(sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn first_href(root: ElementRef<'_>, sel: &Selector) -> Option<String> {
    root.select(sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

struct ListingSelectors {
    company: Selector,
    name: Selector,
    location: Selector,
    description: Selector,
    batch: Selector,
    industry: Selector,
    tag: Selector,
    team_size: Selector,
    badge: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            company: selector(".company")?,
            name: selector(".name")?,
            location: selector(".location")?,
            description: selector(".description")?,
            batch: selector(".batch")?,
            industry: selector(".industry")?,
            tag: selector(".tag")?,
            team_size: selector(".team-size")?,
            badge: selector(".badge")?,
        })
    }
}

/// Extracts every `.company` block from a listing page, in page order.
///
/// A block without a non-empty `.name` is a markup error. Missing location,
/// description or batch become empty strings; missing filter attributes
/// become empty lists or `None`.
pub fn parse_listing_page(html: &str) -> Result<Vec<ListingEntry>, ScrapeError> {
    let sel = ListingSelectors::new()?;
    let doc = Html::parse_document(html);

    let mut entries = Vec::new();
    for (idx, block) in doc.select(&sel.company).enumerate() {
        let name = text_of(block, &sel.name);
        if name.is_empty() {
            return Err(ScrapeError::Markup(format!(
                "company block {} has no name",
                idx + 1
            )));
        }

        let team_size = block
            .select(&sel.team_size)
            .next()
            .and_then(|el| parse_team_size(&el.text().collect::<String>()));

        let badges = texts_of(block, &sel.badge)
            .iter()
            .filter_map(|label| Badge::from_label(label))
            .collect();

        entries.push(ListingEntry {
            name,
            location: text_of(block, &sel.location),
            description: text_of(block, &sel.description),
            batch: text_of(block, &sel.batch),
            industries: texts_of(block, &sel.industry),
            tags: texts_of(block, &sel.tag),
            team_size,
            badges,
        });
    }

    Ok(entries)
}

/// Extracts the website link and founders from a detail page.
///
/// Missing sections yield `None` / an empty list, never an error.
pub fn parse_company_detail(html: &str) -> Result<CompanyDetail, ScrapeError> {
    let website_link = selector(".website a")?;
    let person = selector(".founders .person")?;
    let name = selector(".name")?;
    let linkedin = selector("a.linkedin")?;

    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let website = first_href(root, &website_link);
    let founders = doc
        .select(&person)
        .map(|p| Founder {
            name: text_of(p, &name),
            linkedin: first_href(p, &linkedin),
        })
        .collect();

    Ok(CompanyDetail { website, founders })
}

/// First run of digits in `raw`, thousands separators ignored.
fn parse_team_size(raw: &str) -> Option<u32> {
    let digits: String = raw
        .chars()
        .filter(|c| *c != ',')
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <div class="company">
            <h3 class="name"> Acme Corp </h3>
            <span class="location">San Francisco, CA</span>
            <p class="description">
              Anvils as a service
            </p>
            <span class="batch">W21</span>
            <span class="industry">B2B</span>
            <span class="industry">Manufacturing</span>
            <span class="tag">hardware</span>
            <span class="team-size">Team size: 1,250</span>
            <span class="badge">Top Company</span>
            <span class="badge">Hiring</span>
            <span class="badge">Series B</span>
          </div>
          <div class="company">
            <h3 class="name">Beta</h3>
          </div>
        </body></html>
    "#;

    #[test]
    fn listing_fields_trimmed() {
        let entries = parse_listing_page(LISTING).unwrap();
        assert_eq!(entries.len(), 2);

        let acme = &entries[0];
        assert_eq!(acme.name, "Acme Corp");
        assert_eq!(acme.location, "San Francisco, CA");
        assert_eq!(acme.description, "Anvils as a service");
        assert_eq!(acme.batch, "W21");
        assert_eq!(acme.industries, vec!["B2B", "Manufacturing"]);
        assert_eq!(acme.tags, vec!["hardware"]);
        assert_eq!(acme.team_size, Some(1250));
        assert_eq!(acme.badges, vec![Badge::TopCompany, Badge::Hiring]);
    }

    #[test]
    fn listing_missing_fields_are_empty() {
        let entries = parse_listing_page(LISTING).unwrap();
        let beta = &entries[1];
        assert_eq!(beta.name, "Beta");
        assert_eq!(beta.location, "");
        assert_eq!(beta.description, "");
        assert_eq!(beta.batch, "");
        assert!(beta.industries.is_empty());
        assert!(beta.tags.is_empty());
        assert_eq!(beta.team_size, None);
        assert!(beta.badges.is_empty());
    }

    #[test]
    fn listing_without_name_is_markup_error() {
        let html = r#"<div class="company"><span class="batch">S20</span></div>"#;
        let err = parse_listing_page(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Markup(_)));
        assert!(err.to_string().contains("company block 1"));
    }

    #[test]
    fn listing_whitespace_name_is_markup_error() {
        let html = r#"<div class="company"><span class="name">   </span></div>"#;
        assert!(matches!(
            parse_listing_page(html),
            Err(ScrapeError::Markup(_))
        ));
    }

    #[test]
    fn empty_listing_page() {
        let entries = parse_listing_page("<html><body><p>No results</p></body></html>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn detail_full() {
        let html = r#"
            <div class="website"><a href=" https://acme.test ">acme.test</a></div>
            <div class="founders">
              <div class="person">
                <span class="name">Wile E. Coyote</span>
                <a class="linkedin" href="https://linkedin.com/in/wile">in</a>
              </div>
              <div class="person">
                <span class="name"> Road Runner </span>
              </div>
            </div>
        "#;
        let detail = parse_company_detail(html).unwrap();
        assert_eq!(detail.website.as_deref(), Some("https://acme.test"));
        assert_eq!(
            detail.founders,
            vec![
                Founder {
                    name: "Wile E. Coyote".into(),
                    linkedin: Some("https://linkedin.com/in/wile".into()),
                },
                Founder {
                    name: "Road Runner".into(),
                    linkedin: None,
                },
            ]
        );
    }

    #[test]
    fn detail_missing_sections() {
        let detail = parse_company_detail("<html><body><h1>Acme</h1></body></html>").unwrap();
        assert_eq!(detail.website, None);
        assert!(detail.founders.is_empty());
    }

    #[test]
    fn detail_website_without_link() {
        let html = r#"<div class="website">coming soon</div>"#;
        assert_eq!(parse_company_detail(html).unwrap().website, None);
    }

    #[test]
    fn detail_people_outside_founders_ignored() {
        let html = r#"
            <div class="team"><div class="person"><span class="name">Intern</span></div></div>
            <div class="founders"><div class="person"><span class="name">Ada</span></div></div>
        "#;
        let detail = parse_company_detail(html).unwrap();
        assert_eq!(detail.founders.len(), 1);
        assert_eq!(detail.founders[0].name, "Ada");
    }

    #[test]
    fn team_size_parsing() {
        assert_eq!(parse_team_size("42"), Some(42));
        assert_eq!(parse_team_size("Team size: 1,200 people"), Some(1200));
        assert_eq!(parse_team_size("unknown"), None);
        assert_eq!(parse_team_size(""), None);
    }
}
