//! End-to-end entry point for a rank checking run.
//!
//! Assembles the engine set, fetcher, pacing and sink from configuration,
//! then hands control to the campaign runner.

use std::path::PathBuf;
use std::sync::Arc;

use crate::engines;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::models::Config;
use crate::pacing::{Pacer, WallClockPacer};
use crate::report::{FileSink, MemorySink, ReportSink};
use crate::services::{CampaignRunner, Orchestrator};

/// Per-run inputs, already resolved from CLI flags and files.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub keywords: Vec<String>,
    pub targets: Vec<String>,
    /// Backend names to query; empty means every known backend
    pub engines: Vec<String>,
    /// When set, reports are appended here as JSON lines instead of being
    /// held in memory and logged at the end
    pub output: Option<PathBuf>,
}

/// Run the whole batch. Returns once every campaign has been reported.
pub async fn run_rank_check(config: &Config, options: &RunOptions) -> Result<()> {
    let engines = engines::select(&options.engines)?;
    log::info!(
        "Using {} engine(s): {}",
        engines.len(),
        engines
            .iter()
            .map(|e| e.id().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let fetcher = Arc::new(HttpFetcher::new(&config.client, &engines)?);
    let pacer: Arc<dyn Pacer> = Arc::new(WallClockPacer::from_config(&config.pacing));
    let orchestrator = Orchestrator::new(engines, fetcher, Arc::clone(&pacer), &config.polling);
    let runner = CampaignRunner::new(orchestrator, pacer);

    match &options.output {
        Some(path) => {
            let mut sink = FileSink::new(path);
            runner
                .run(&options.keywords, &options.targets, &mut sink)
                .await?;
            log::info!("Reports written to {}", path.display());
        }
        None => {
            let mut sink = MemorySink::new();
            runner
                .run(&options.keywords, &options.targets, &mut sink)
                .await?;
            log::info!("Completed {} campaign(s)", sink.reports().len());
        }
    }

    Ok(())
}
