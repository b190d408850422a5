//! Thread-Harvest main entry point
//!
//! This is the command-line interface for the Thread-Harvest forum thread downloader.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use thread_harvest::config::{load_config_with_hash, Config};
use thread_harvest::crawler::{crawl, crawl_saved};
use thread_harvest::output::write_thread_json;
use thread_harvest::{HarvestError, ThreadResult};
use tracing_subscriber::EnvFilter;

/// Thread-Harvest: download a complete forum thread as JSON
///
/// Fetches every page of the thread, extracts author, timestamp and text of
/// each post, removes repeated posts and saves the result as
/// `thread_<id>.json`.
#[derive(Parser, Debug)]
#[command(name = "thread-harvest")]
#[command(version)]
#[command(about = "Download a complete forum thread as JSON", long_about = None)]
struct Cli {
    /// Thread URL (must contain a threadid parameter)
    #[arg(value_name = "URL")]
    url: String,

    /// Directory for the JSON output [default: data]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Seconds to wait between page requests [default: 1.5]
    #[arg(long, value_name = "SECS")]
    delay: Option<f64>,

    /// Fetch at most this many pages
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Build the thread from saved page files (page 1 first) instead of the network
    #[arg(long, value_name = "FILE", num_args = 1..)]
    from_html: Vec<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let output_dir = PathBuf::from(&config.output.output_dir);

    let result = if cli.from_html.is_empty() {
        crawl(&cli.url, &config).await
    } else {
        tracing::info!(
            "Building thread from {} saved page file(s)",
            cli.from_html.len()
        );
        crawl_saved(&cli.url, &cli.from_html, &config).await
    };

    let thread = match result {
        Ok(thread) => thread,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            if let Some(hint) = failure_hint(&e) {
                eprintln!("{}", hint);
            }
            return Err(e.into());
        }
    };

    report(&thread, &output_dir)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("thread_harvest=info,warn"),
            1 => EnvFilter::new("thread_harvest=debug,info"),
            2 => EnvFilter::new("thread_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(delay) = cli.delay {
        config.fetch.delay_secs = delay;
    }
    if cli.max_pages.is_some() {
        config.crawl.max_pages = cli.max_pages;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.output_dir = dir.display().to_string();
    }

    thread_harvest::config::validate(&config).context("invalid settings")?;
    Ok(config)
}

/// Writes the artifact and prints where it went
fn report(thread: &ThreadResult, output_dir: &Path) -> anyhow::Result<()> {
    let path = write_thread_json(thread, output_dir)
        .with_context(|| format!("failed to write output to {}", output_dir.display()))?;

    if thread.posts.is_empty() {
        eprintln!(
            "Warning: no posts found in thread {}. Check the URL or whether the forum is reachable.",
            thread.thread_id
        );
    }
    println!("Saved: {} ({} posts)", path.display(), thread.posts.len());
    Ok(())
}

/// Extra guidance for failures a user can act on
fn failure_hint(error: &HarvestError) -> Option<&'static str> {
    match error.status_code() {
        Some(403) | Some(429) => Some(
            "The forum refused the request. Sites like this often block datacenter IPs or \
             rate-limit automated clients. Try again later with a larger --delay, or save the \
             thread pages from a browser and rerun with --from-html.",
        ),
        Some(404) => Some("The page was not found. Check the thread URL."),
        _ if error.is_retryable() => {
            Some("Network error. Check the URL and whether the forum is reachable.")
        }
        _ => None,
    }
}
