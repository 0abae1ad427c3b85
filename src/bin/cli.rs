//! serptrack CLI
//!
//! Checks where a target site ranks for one or more keywords across the
//! known search engine backends.

use std::path::PathBuf;

use clap::Parser;
use serptrack::{
    engines,
    error::Result,
    models::Config,
    pipeline::{self, RunOptions},
    sources,
};

/// serptrack - search engine rank checker
#[derive(Parser, Debug)]
#[command(
    name = "serptrack",
    version,
    about = "Tracks a site's rank across search engine result pages"
)]
struct Cli {
    /// Keyword to check
    #[arg(short, long, conflicts_with = "keyword_file")]
    keyword: Option<String>,

    /// File with one keyword per line
    #[arg(long)]
    keyword_file: Option<PathBuf>,

    /// Target site to look for in result listings
    #[arg(short, long, conflicts_with = "site_file")]
    site: Option<String>,

    /// File with one target site per line
    #[arg(long)]
    site_file: Option<PathBuf>,

    /// Backend to query, repeatable (default: all known backends)
    #[arg(short, long = "engine", value_name = "NAME")]
    engines: Vec<String>,

    /// Result page ceiling per backend
    #[arg(short, long)]
    pages: Option<usize>,

    /// Custom User-Agent header for all requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Append reports to this file as JSON lines
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long, default_value = "serptrack.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("serptrack starting...");
    log::debug!("Known engines: {}", engines::known_names().join(", "));

    let mut config = Config::load_or_default(&cli.config);
    if let Some(pages) = cli.pages {
        config.polling.max_pages = pages;
    }
    if let Some(user_agent) = cli.user_agent {
        config.client.user_agent = user_agent;
    }
    config.validate()?;

    let keywords = sources::load_keywords(cli.keyword.as_deref(), cli.keyword_file.as_deref())?;
    let targets = sources::load_sites(cli.site.as_deref(), cli.site_file.as_deref())?;

    let options = RunOptions {
        keywords,
        targets,
        engines: cli.engines,
        output: cli.output,
    };

    pipeline::run_rank_check(&config, &options).await?;

    log::info!("Done!");
    Ok(())
}
