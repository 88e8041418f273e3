//! The `serve` subcommand: exposes scrapes as CSV downloads over HTTP.

use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use anyhow::{Context, Result};
use clap::Args;
use ycdb_lib::{scrape_companies, ScrapeClient, ScrapeParams, YcdbError};

use crate::config::{ServerSettings, UpstreamArgs, UpstreamSettings};
use crate::output::{companies_to_csv, CSV_FILENAME};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind [env: YCDB_HOST]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind [env: YCDB_PORT]
    #[arg(long)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub upstream: UpstreamArgs,
}

pub async fn run(args: &ServeArgs) -> Result<()> {
    let server = ServerSettings::resolve(args.host.as_deref(), args.port);
    let upstream = UpstreamSettings::resolve(&args.upstream)?;

    let address = format!("{}:{}", server.host, server.port);
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind {}", address))?;
    tracing::info!(
        "Listening on http://{} (upstream {})",
        address,
        upstream.base_url
    );

    build_server(listener, upstream.client())?.await?;
    Ok(())
}

pub fn build_server(listener: TcpListener, client: ScrapeClient) -> std::io::Result<Server> {
    let client = web::Data::new(client);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(client.clone())
            .configure(routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(scrape)
        .service(web::scope("/companies").service(scrape));
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[get("/scrape")]
async fn scrape(
    client: web::Data<ScrapeClient>,
    params: web::Query<ScrapeParams>,
) -> HttpResponse {
    let companies = match scrape_companies(client.get_ref(), &params).await {
        Ok(companies) => companies,
        Err(e @ YcdbError::InvalidInput(_)) => {
            tracing::warn!("Rejected scrape request: {}", e);
            return HttpResponse::BadRequest().body(e.to_string());
        }
        Err(e @ YcdbError::Scrape(_)) => {
            tracing::error!("{}", e);
            return HttpResponse::BadGateway().body(e.to_string());
        }
    };

    match companies_to_csv(&companies) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILENAME),
            ))
            .body(csv),
        Err(e) => {
            tracing::error!("CSV encoding failed: {}", e);
            HttpResponse::InternalServerError().body("failed to encode CSV")
        }
    }
}
