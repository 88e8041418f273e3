mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "ycdb")]
#[command(about = "Scrape company listings from the ycdb directory into CSV")]
struct Cli {
    /// Output format for scrape results: csv, json, or table
    #[arg(long, default_value = "csv", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape companies and print them
    Scrape(Box<commands::scrape::ScrapeArgs>),
    /// Serve scrapes over HTTP as CSV downloads
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ycdb=info".parse()?)
                .add_directive("actix_web=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "table" => OutputFormat::Table,
        _ => OutputFormat::Csv,
    };

    match &cli.command {
        Commands::Scrape(args) => commands::scrape::run(args.as_ref(), &format).await?,
        Commands::Serve(args) => commands::serve::run(args).await?,
    }

    Ok(())
}
