//! Agent Pool Cost CLI
//!
//! Fetches the job history of a hosted agent pool and estimates the
//! monthly compute cost per OS category.

mod config;
mod output;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use pool_cost_lib::{
    build_report, client::DEFAULT_API_URL, parse_arguments, validate_credentials, ClientConfig,
    JobClient, RateTable,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Agent Pool Cost CLI
#[derive(Parser)]
#[command(name = "pool-cost")]
#[command(
    author,
    version,
    about = "Estimate monthly hosted agent cost for an Azure DevOps agent pool",
    long_about = None
)]
pub struct Cli {
    /// Agent cloud id of the pool to report on
    pub agent_cloud_id: Option<String>,

    /// Start of the reporting window, inclusive (e.g. 2023-01-01)
    pub date_from: Option<String>,

    /// End of the reporting window, inclusive (e.g. 2023-03-31)
    pub date_through: Option<String>,

    /// Organization name
    #[arg(long, env = "AZURE_DEVOPS_ORG")]
    pub org: Option<String>,

    /// Personal access token
    #[arg(long, env = "AZURE_DEVOPS_PAT", hide_env_values = true)]
    pub pat: Option<String>,

    /// Service root URL [default: https://dev.azure.com/]
    #[arg(long, env = "AZURE_DEVOPS_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Path to config file (defaults to ~/.config/pool-cost/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let file_config = match &cli.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };

    // Validate everything before touching the network
    let organization = cli.org.or(file_config.organization);
    let credentials = validate_credentials(organization.as_deref(), cli.pat.as_deref())?;
    let request = parse_arguments(
        cli.agent_cloud_id.as_deref(),
        cli.date_from.as_deref(),
        cli.date_through.as_deref(),
    )?;

    let client_config = ClientConfig {
        api_url: cli
            .api_url
            .or(file_config.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        request_timeout: Duration::from_secs(
            cli.timeout_secs
                .or(file_config.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    };

    info!(
        organization = %credentials.organization,
        agent_cloud_id = %request.agent_cloud_id,
        "Fetching job history"
    );

    let client = JobClient::new(&client_config, credentials)
        .context("Failed to create job history client")?;
    let jobs = client
        .job_list(&request.agent_cloud_id)
        .await
        .context("Failed to fetch job list")?;

    let report = build_report(&jobs, &request.window, &RateTable::default())?;
    report::print_report(&report);

    Ok(())
}
