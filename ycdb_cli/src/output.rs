use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tabled::{Table, Tabled};
use ycdb_lib::types::Company;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Table,
}

/// File name offered for CSV downloads and used when `--out` is a directory.
pub const CSV_FILENAME: &str = "yc_companies.csv";

pub const CSV_HEADERS: [&str; 7] = [
    "Company Name",
    "Location",
    "Description",
    "YC Batch",
    "Website",
    "Founder Names",
    "LinkedIn URLs",
];

#[derive(Tabled, Serialize, Debug)]
pub struct CompanyRow {
    #[tabled(rename = "Company Name")]
    #[serde(rename = "Company Name")]
    name: String,
    #[tabled(rename = "Location")]
    #[serde(rename = "Location")]
    location: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "YC Batch")]
    #[serde(rename = "YC Batch")]
    batch: String,
    #[tabled(rename = "Website")]
    #[serde(rename = "Website")]
    website: String,
    #[tabled(rename = "Founder Names")]
    #[serde(rename = "Founder Names")]
    founders: String,
    #[tabled(rename = "LinkedIn URLs")]
    #[serde(rename = "LinkedIn URLs")]
    linkedin: String,
}

impl CompanyRow {
    fn record(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            self.location.as_str(),
            self.description.as_str(),
            self.batch.as_str(),
            self.website.as_str(),
            self.founders.as_str(),
            self.linkedin.as_str(),
        ]
    }
}

pub fn build_company_rows(companies: &[Company]) -> Vec<CompanyRow> {
    companies
        .iter()
        .map(|c| CompanyRow {
            name: c.name.clone(),
            location: c.location.clone(),
            description: c.description.clone(),
            batch: c.batch.clone(),
            website: c.website.clone().unwrap_or_default(),
            founders: c.founder_names().join(", "),
            linkedin: c.linkedin_urls().join(", "),
        })
        .collect()
}

// -- CSV output --

/// Writes the header row followed by one row per company. The header is
/// written even when `companies` is empty.
pub fn write_companies_csv<W: Write>(writer: W, companies: &[Company]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for row in build_company_rows(companies) {
        wtr.write_record(row.record())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn companies_to_csv(companies: &[Company]) -> Result<String> {
    let mut buf = Vec::new();
    write_companies_csv(&mut buf, companies)?;
    Ok(String::from_utf8(buf)?)
}

pub fn print_companies_csv(companies: &[Company]) -> Result<()> {
    write_companies_csv(std::io::stdout().lock(), companies)
}

// -- Table output --

pub fn print_companies_table(companies: &[Company]) {
    println!("{}", Table::new(build_company_rows(companies)));
}

// -- JSON output --

pub fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ycdb_lib::types::Founder;

    fn acme() -> Company {
        Company {
            name: "Acme".into(),
            location: "San Francisco, CA".into(),
            description: "Anvils, rockets and \"portable holes\"".into(),
            batch: "W21".into(),
            website: Some("https://acme.test".into()),
            founders: vec![
                Founder {
                    name: "Wile Coyote".into(),
                    linkedin: Some("https://linkedin.com/in/wile".into()),
                },
                Founder {
                    name: "Road Runner".into(),
                    linkedin: None,
                },
            ],
        }
    }

    fn bare(name: &str) -> Company {
        Company {
            name: name.into(),
            location: String::new(),
            description: String::new(),
            batch: "S22".into(),
            website: None,
            founders: Vec::new(),
        }
    }

    #[test]
    fn test_header_line() {
        let csv = companies_to_csv(&[acme()]).unwrap();
        assert_eq!(
            csv.lines().next().unwrap(),
            "Company Name,Location,Description,YC Batch,Website,Founder Names,LinkedIn URLs"
        );
    }

    #[test]
    fn test_header_written_for_empty_input() {
        let csv = companies_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Company Name,"));
    }

    #[test]
    fn test_one_row_per_company() {
        let csv = companies_to_csv(&[acme(), bare("Beta"), bare("Gamma")]).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "Beta");
        assert_eq!(&rows[2][3], "S22");
    }

    #[test]
    fn test_fields_survive_quoting() {
        let csv = companies_to_csv(&[acme()]).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), CSV_HEADERS.len());

        let row = rdr.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Acme");
        assert_eq!(&row[1], "San Francisco, CA");
        assert_eq!(&row[2], "Anvils, rockets and \"portable holes\"");
        assert_eq!(&row[4], "https://acme.test");
        assert_eq!(&row[5], "Wile Coyote, Road Runner");
        assert_eq!(&row[6], "https://linkedin.com/in/wile");
    }

    #[test]
    fn test_founder_column_splits_back() {
        let csv = companies_to_csv(&[acme(), bare("Beta")]).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let founders: Vec<Vec<String>> = rdr
            .records()
            .map(|r| {
                r.unwrap()[5]
                    .split(", ")
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        assert_eq!(founders[0], vec!["Wile Coyote", "Road Runner"]);
        assert!(founders[1].is_empty());
    }

    #[test]
    fn test_linkedin_column_splits_back() {
        let mut company = acme();
        company.founders[1].linkedin = Some("https://linkedin.com/in/road".into());
        let csv = companies_to_csv(&[company, bare("Beta")]).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let links: Vec<Vec<String>> = rdr
            .records()
            .map(|r| {
                r.unwrap()[6]
                    .split(", ")
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        assert_eq!(
            links[0],
            vec!["https://linkedin.com/in/wile", "https://linkedin.com/in/road"]
        );
        assert!(links[1].is_empty());
    }

    #[test]
    fn test_build_company_rows_missing_website() {
        let rows = build_company_rows(&[bare("Beta")]);
        assert_eq!(rows[0].website, "");
        assert_eq!(rows[0].founders, "");
        assert_eq!(rows[0].linkedin, "");
    }

    #[test]
    fn test_json_rows_use_column_names() {
        let rows = build_company_rows(&[acme()]);
        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(value[0]["Company Name"], "Acme");
        assert_eq!(value[0]["YC Batch"], "W21");
    }
}
