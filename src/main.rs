//! Sitesift main entry point
//!
//! This is the command-line interface for the sitesift page analyzer.

use anyhow::Context;
use clap::Parser;
use sitesift::config::{load_config, Config};
use sitesift::crawler::Orchestrator;
use sitesift::output::print_report;
use sitesift::state::CrawlStatus;
use sitesift::storage::{open_storage, Storage};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Sitesift: a single-page web analyzer
///
/// Sitesift fetches one HTML page, reports its heading structure, HTML
/// version, title, login-form presence and link split, and probes a bounded
/// number of its links for liveness. Results are persisted to SQLite.
#[derive(Parser, Debug)]
#[command(name = "sitesift")]
#[command(version)]
#[command(about = "A single-page web analyzer", long_about = None)]
struct Cli {
    /// URL of the page to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the stored result for the URL without crawling
    #[arg(long)]
    show: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => Config::default(),
    };

    if cli.show {
        return handle_show(&config, &cli.url);
    }

    handle_crawl(config, &cli.url).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesift=info,warn"),
            1 => EnvFilter::new("sitesift=debug,info"),
            2 => EnvFilter::new("sitesift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --show mode: prints the stored record without crawling
fn handle_show(config: &Config, url: &str) -> anyhow::Result<ExitCode> {
    let storage = open_storage(Path::new(&config.output.database_path))
        .context("failed to open database")?;

    let record = storage
        .get_page_by_url(url)
        .context("failed to query database")?;

    match record {
        Some(record) => {
            let broken_links = storage
                .get_broken_links(record.id)
                .context("failed to load broken links")?;
            print_report(&record, &broken_links);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No stored result for {}", url);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Handles the main operation: one crawl to completion, then the report
async fn handle_crawl(config: Config, url: &str) -> anyhow::Result<ExitCode> {
    let database_path = config.output.database_path.clone();
    let storage = open_storage(Path::new(&database_path)).context("failed to open database")?;
    let storage = Arc::new(Mutex::new(storage));

    let orchestrator =
        Orchestrator::new(config, storage).context("failed to initialize analyzer")?;

    let record = orchestrator
        .crawl(url)
        .await
        .with_context(|| format!("could not analyze {}", url))?;

    let broken_links = {
        let storage = orchestrator.storage();
        let guard = storage.lock().unwrap();
        guard
            .get_broken_links(record.id)
            .context("failed to load broken links")?
    };

    print_report(&record, &broken_links);

    if record.status == CrawlStatus::Error {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
