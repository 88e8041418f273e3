//! Runtime configuration: CLI flag, then environment variable, then default.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use ycdb_lib::ycdb_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use ycdb_lib::ScrapeClient;

pub const ENV_BASE_URL: &str = "YCDB_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "YCDB_TIMEOUT_SECS";
pub const ENV_HOST: &str = "YCDB_HOST";
pub const ENV_PORT: &str = "YCDB_PORT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Flags shared by every command that talks to the directory site.
#[derive(Args, Clone, Debug, Default)]
pub struct UpstreamArgs {
    /// Directory site base URL [env: YCDB_BASE_URL]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds [env: YCDB_TIMEOUT_SECS]
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl UpstreamSettings {
    pub fn resolve(args: &UpstreamArgs) -> Result<Self> {
        Self::resolve_with(args, |key| std::env::var(key).ok())
    }

    fn resolve_with(args: &UpstreamArgs, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = args
            .base_url
            .clone()
            .or_else(|| env(ENV_BASE_URL))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match args.timeout_secs {
            Some(secs) => secs,
            None => env_parse(&env, ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT.as_secs()),
        };
        if timeout_secs == 0 {
            bail!("timeout must be at least 1 second");
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn client(&self) -> ScrapeClient {
        ScrapeClient::with_base_url(&self.base_url).with_timeout(self.timeout)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn resolve(host: Option<&str>, port: Option<u16>) -> Self {
        Self::resolve_with(host, port, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        host: Option<&str>,
        port: Option<u16>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let host = host
            .map(str::to_string)
            .or_else(|| env(ENV_HOST))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port.unwrap_or_else(|| env_parse(&env, ENV_PORT, DEFAULT_PORT));
        Self { host, port }
    }
}

fn env_parse<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match env(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}
