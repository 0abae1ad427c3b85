// src/services/runner.rs

//! Multi-keyword campaign batching.

use std::sync::Arc;

use crate::error::Result;
use crate::models::CampaignReport;
use crate::pacing::Pacer;
use crate::report::ReportSink;

use super::Orchestrator;

/// Runs one campaign per (keyword, target) pair, in order, with a cooldown
/// between campaigns.
///
/// The cooldown is a separate, much coarser knob than the in-campaign round
/// delay; it never runs after the final campaign. Each report is streamed
/// into the sink as soon as its campaign completes, so a long batch never
/// holds every result in memory.
pub struct CampaignRunner {
    orchestrator: Orchestrator,
    pacer: Arc<dyn Pacer>,
}

impl CampaignRunner {
    pub fn new(orchestrator: Orchestrator, pacer: Arc<dyn Pacer>) -> Self {
        Self { orchestrator, pacer }
    }

    /// Run the whole batch. Only sink errors abort; campaign-level problems
    /// are already folded into each report.
    pub async fn run(
        &self,
        keywords: &[String],
        targets: &[String],
        sink: &mut dyn ReportSink,
    ) -> Result<()> {
        let total = keywords.len() * targets.len();
        log::info!(
            "Running {} campaign(s): {} keyword(s) x {} target(s)",
            total,
            keywords.len(),
            targets.len()
        );

        let mut completed = 0usize;
        for keyword in keywords {
            for target in targets {
                let mut campaign = self.orchestrator.start_campaign(keyword, target).await;
                let report = self.orchestrator.run(&mut campaign).await;
                log_summary(&report);
                sink.append(&report).await?;

                completed += 1;
                if completed < total {
                    self.pacer.campaign_cooldown().await;
                }
            }
        }
        Ok(())
    }
}

fn log_summary(report: &CampaignReport) {
    for outcome in &report.rankings {
        match outcome.rank {
            Some(rank) => log::info!(
                "  {} -> rank {} for '{}'",
                outcome.engine,
                rank,
                report.keyword
            ),
            None => log::info!(
                "  {} -> {:?} after {} page(s) for '{}'",
                outcome.engine,
                outcome.status,
                outcome.pages_checked,
                report.keyword
            ),
        }
    }
}
