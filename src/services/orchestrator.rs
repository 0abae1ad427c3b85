// src/services/orchestrator.rs

//! Round-based polling orchestrator.
//!
//! Drives every registered adapter one page per round instead of draining one
//! adapter to completion, so worst-case latency is bounded by the page ceiling
//! no matter how many backends are registered. One adapter's failure never
//! touches another: errors land on the failing adapter's cursor and the round
//! carries on.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};

use crate::engines::EngineAdapter;
use crate::fetch::PageFetcher;
use crate::models::{Campaign, CampaignReport, ErrorKind, PollCursor, PollingConfig};
use crate::pacing::Pacer;

/// Owns the adapter set and drives campaigns round by round.
pub struct Orchestrator {
    engines: Vec<Arc<dyn EngineAdapter>>,
    fetcher: Arc<dyn PageFetcher>,
    pacer: Arc<dyn Pacer>,
    max_pages: usize,
    max_concurrent: usize,
    campaign_timeout: Option<Duration>,
}

impl Orchestrator {
    pub fn new(
        engines: Vec<Arc<dyn EngineAdapter>>,
        fetcher: Arc<dyn PageFetcher>,
        pacer: Arc<dyn Pacer>,
        polling: &PollingConfig,
    ) -> Self {
        Self {
            engines,
            fetcher,
            pacer,
            max_pages: polling.max_pages,
            max_concurrent: polling.max_concurrent,
            campaign_timeout: polling.campaign_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Register every engine for a fresh campaign, priming sessions where
    /// the backend requires it.
    ///
    /// A failed warmup skips that backend for the whole campaign: its cursor
    /// starts out `Failed` with a registration error, a warning is logged,
    /// and the remaining backends proceed.
    pub async fn start_campaign(&self, keyword: &str, target: &str) -> Campaign {
        let mut campaign = Campaign::new(keyword, target);

        for engine in &self.engines {
            let ceiling = engine
                .max_pages()
                .map_or(self.max_pages, |m| m.min(self.max_pages));
            let mut cursor = PollCursor::new(engine.id(), ceiling, engine.page_size());

            if let Some(warmup) = engine.warmup_request() {
                if let Err(e) = self.fetcher.fetch(&warmup).await {
                    log::warn!(
                        "Failed to register engine {}: {e}; skipping it for this campaign",
                        engine.id()
                    );
                    cursor.mark_failed(ErrorKind::Registration, e.to_string());
                }
            }
            campaign.cursors.push(cursor);
        }

        log::info!(
            "Campaign '{}' vs '{}': {} of {} engines registered",
            campaign.keyword,
            campaign.target,
            campaign.cursors.iter().filter(|c| c.is_active()).count(),
            self.engines.len()
        );
        campaign
    }

    /// Drive the campaign to completion and return its report.
    ///
    /// The loop ends as soon as no cursor is active, when every cursor's page
    /// ceiling has been covered, or when the campaign deadline passes - in
    /// which case the partial mapping collected so far is reported.
    pub async fn run(&self, campaign: &mut Campaign) -> CampaignReport {
        let rounds_limit = campaign
            .cursors
            .iter()
            .map(PollCursor::max_pages)
            .max()
            .unwrap_or(0);
        let deadline = self
            .campaign_timeout
            .map(|t| tokio::time::Instant::now() + t);

        let mut round = 0;
        while round < rounds_limit && campaign.any_active() {
            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() >= deadline {
                    log::warn!(
                        "Campaign '{}' hit its deadline; reporting partial results",
                        campaign.keyword
                    );
                    break;
                }
            }

            self.pacer.round_delay().await;
            self.poll_round(campaign).await;
            round += 1;
        }

        let report = campaign.report();
        log::info!(
            "Campaign '{}' finished after {} round(s); best rank: {}",
            campaign.keyword,
            round,
            report
                .best_rank()
                .map_or_else(|| "none".to_string(), |r| r.to_string())
        );
        report
    }

    /// One synchronized pass: every active cursor attempts exactly one page.
    ///
    /// Cursors move into their tasks and back, so no cursor is ever touched
    /// by two tasks at once; collecting the buffered stream is the round
    /// barrier that keeps round N+1 from starting early.
    async fn poll_round(&self, campaign: &mut Campaign) {
        let keyword = campaign.keyword.clone();
        let target = campaign.target.clone();
        let cursors = std::mem::take(&mut campaign.cursors);

        let polled = stream::iter(self.engines.iter().cloned().zip(cursors))
            .map(|(engine, mut cursor)| {
                let fetcher = Arc::clone(&self.fetcher);
                let pacer = Arc::clone(&self.pacer);
                let keyword = keyword.clone();
                let target = target.clone();
                async move {
                    if cursor.is_active() {
                        pacer.adapter_jitter().await;
                        poll_step(
                            engine.as_ref(),
                            fetcher.as_ref(),
                            &keyword,
                            &target,
                            &mut cursor,
                        )
                        .await;
                    }
                    cursor
                }
            })
            .buffered(self.max_concurrent.max(1))
            .collect::<Vec<_>>()
            .await;

        campaign.cursors = polled;
    }
}

/// Execute one cursor transition: advance, fetch, extract, match.
async fn poll_step(
    engine: &dyn EngineAdapter,
    fetcher: &dyn PageFetcher,
    keyword: &str,
    target: &str,
    cursor: &mut PollCursor,
) {
    let Some(page) = cursor.advance() else {
        return;
    };

    let request = engine.build_page_request(keyword, page);
    log::debug!("{}: fetching page {} ({})", engine.id(), page, request.url);

    let raw = match fetcher.fetch(&request).await {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("{}: page {} fetch failed: {e}", engine.id(), page);
            cursor.mark_failed(ErrorKind::Fetch, e.to_string());
            return;
        }
    };

    match engine.extract_listings(&raw) {
        Ok(listings) => {
            if let Some(position) = engine.find_target_position(&listings, target) {
                cursor.mark_found(position);
                log::info!(
                    "{}: '{}' ranks {} for '{}' (page {}, position {})",
                    engine.id(),
                    target,
                    cursor.found_rank().unwrap_or(0),
                    keyword,
                    page,
                    position
                );
            } else {
                cursor.record_miss();
            }
        }
        Err(e) if e.is_soft_miss() => {
            // Empty page or changed markup; the next page still gets its turn.
            log::debug!("{}: page {} had no recognizable listings", engine.id(), page);
            cursor.record_miss();
        }
        Err(e) => {
            log::warn!("{}: page {} extraction error: {e}", engine.id(), page);
            cursor.record_miss();
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::engines::PageRequest;
    use crate::error::{AppError, Result};
    use crate::fetch::PageFetcher;

    /// Fetcher that serves canned bodies (or failures) keyed by URL and
    /// counts every request it sees.
    #[derive(Default)]
    pub struct ScriptedFetcher {
        responses: HashMap<String, std::result::Result<String, String>>,
        hits: Mutex<HashMap<String, usize>>,
    }

    impl ScriptedFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn stub(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(url.to_string(), Ok(body.to_string()));
            self
        }

        pub fn fail(mut self, url: &str, message: &str) -> Self {
            self.responses
                .insert(url.to_string(), Err(message.to_string()));
            self
        }

        pub fn fetch_count(&self, url: &str) -> usize {
            self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
        }

        pub fn total_fetches(&self) -> usize {
            self.hits.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, request: &PageRequest) -> Result<String> {
            *self
                .hits
                .lock()
                .unwrap()
                .entry(request.url.clone())
                .or_insert(0) += 1;

            match self.responses.get(&request.url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(message)) => Err(AppError::fetch(&request.engine, message)),
                None => Err(AppError::fetch(
                    &request.engine,
                    format!("unexpected request for {}", request.url),
                )),
            }
        }
    }
}
