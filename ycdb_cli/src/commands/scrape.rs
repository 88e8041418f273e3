//! The `scrape` subcommand: collects companies and prints or saves them.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use ycdb_lib::types::Company;
use ycdb_lib::validation;
use ycdb_lib::{collect_companies, CompanyFilter};

use crate::config::{UpstreamArgs, UpstreamSettings};
use crate::output::{
    print_companies_csv, print_companies_table, print_json, write_companies_csv, OutputFormat,
    CSV_FILENAME,
};

/// Arguments for the `scrape` subcommand.
///
/// Text filters are matched case-insensitively. Boolean flags require the
/// matching badge on the listing; leaving a flag off places no constraint.
#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Number of companies to collect (values below 1 fall back to 10)
    #[arg(short = 'n', long = "count", default_value_t = 10, allow_negative_numbers = true)]
    pub count: i64,

    /// Exact batch label, e.g. W21
    #[arg(long)]
    pub batch: Option<String>,

    /// Substring of any industry label
    #[arg(long)]
    pub industry: Option<String>,

    /// Substring of the location
    #[arg(long)]
    pub region: Option<String>,

    /// Exact tag label
    #[arg(long)]
    pub tag: Option<String>,

    /// Team size range: 1-10, 500+, or a single number
    #[arg(long)]
    pub company_size: Option<String>,

    /// Only top companies
    #[arg(long)]
    pub top_companies: bool,

    /// Only companies that are hiring
    #[arg(long)]
    pub is_hiring: bool,

    /// Only nonprofits
    #[arg(long)]
    pub nonprofit: bool,

    /// Only black-founded companies
    #[arg(long)]
    pub black_founded: bool,

    /// Only hispanic/latino-founded companies
    #[arg(long)]
    pub hispanic_latino_founded: bool,

    /// Only women-founded companies
    #[arg(long)]
    pub women_founded: bool,

    /// Write CSV to this file (or to yc_companies.csv inside a directory)
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}

impl ScrapeArgs {
    fn filter(&self) -> Result<CompanyFilter> {
        Ok(CompanyFilter {
            batch: validation::validate_filter_text(self.batch.as_deref())?,
            industry: validation::validate_filter_text(self.industry.as_deref())?,
            region: validation::validate_filter_text(self.region.as_deref())?,
            tag: validation::validate_filter_text(self.tag.as_deref())?,
            company_size: validation::validate_company_size(self.company_size.as_deref())?,
            top_companies: self.top_companies,
            is_hiring: self.is_hiring,
            nonprofit: self.nonprofit,
            black_founded: self.black_founded,
            hispanic_latino_founded: self.hispanic_latino_founded,
            women_founded: self.women_founded,
        })
    }
}

pub async fn run(args: &ScrapeArgs, format: &OutputFormat) -> Result<()> {
    if args.out.is_some() && *format != OutputFormat::Csv {
        bail!("--out only supports csv output");
    }

    let filter = args.filter()?;
    let target = validation::count_or_default(args.count);
    if args.count <= 0 {
        eprintln!(
            "Note: --count {} is not positive, using {}.",
            args.count, target
        );
    }

    let settings = UpstreamSettings::resolve(&args.upstream)?;
    tracing::info!(
        "Scraping {} companies from {} (filters: {})",
        target,
        settings.base_url,
        if filter.is_empty() { "none" } else { "active" }
    );
    let client = settings.client();
    let companies = collect_companies(&client, target, &filter).await?;

    if companies.len() < target {
        eprintln!(
            "Note: only {} of {} requested companies were found.",
            companies.len(),
            target
        );
    }

    if let Some(ref out) = args.out {
        let path = save_csv(out, &companies)?;
        eprintln!("Wrote {} companies to {}", companies.len(), path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Csv => print_companies_csv(&companies)?,
        OutputFormat::Json => print_json(&companies),
        OutputFormat::Table => print_companies_table(&companies),
    }
    Ok(())
}

fn resolve_out_path(out: &Path) -> PathBuf {
    if out.is_dir() {
        out.join(CSV_FILENAME)
    } else {
        out.to_path_buf()
    }
}

fn save_csv(out: &Path, companies: &[Company]) -> Result<PathBuf> {
    let path = resolve_out_path(out);
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_companies_csv(std::io::BufWriter::new(file), companies)?;
    Ok(path)
}
