//! Campaign state and report structures.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::cursor::{CursorError, CursorStatus, PollCursor};

/// Mutable state of one keyword/target run: an owned cursor per registered
/// adapter, in adapter-registration order.
///
/// Created once at the start of a run and discarded after the final report is
/// read; no campaign state lives outside this value.
#[derive(Debug)]
pub struct Campaign {
    pub keyword: String,
    pub target: String,
    pub cursors: Vec<PollCursor>,
}

impl Campaign {
    pub fn new(keyword: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            target: target.into(),
            cursors: Vec::new(),
        }
    }

    /// Whether any cursor can still issue a fetch.
    pub fn any_active(&self) -> bool {
        self.cursors.iter().any(|c| c.is_active())
    }

    /// Snapshot the campaign into its final report.
    pub fn report(&self) -> CampaignReport {
        CampaignReport {
            keyword: self.keyword.clone(),
            target: self.target.clone(),
            checked_at: Utc::now(),
            rankings: self.cursors.iter().map(EngineOutcome::from_cursor).collect(),
        }
    }
}

/// Terminal outcome of one adapter within one campaign.
///
/// Failed adapters are reported with no rank rather than omitted, so callers
/// can tell "not found within the page ceiling" from "backend unreachable".
#[derive(Debug, Clone, Serialize)]
pub struct EngineOutcome {
    pub engine: String,
    pub status: CursorStatus,
    pub rank: Option<usize>,
    /// Pages attempted before the cursor went terminal
    pub pages_checked: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CursorError>,
}

impl EngineOutcome {
    pub fn from_cursor(cursor: &PollCursor) -> Self {
        Self {
            engine: cursor.adapter_id().to_string(),
            status: cursor.status(),
            rank: cursor.found_rank(),
            pages_checked: cursor.current_page(),
            error: cursor.last_error().cloned(),
        }
    }
}

/// Aggregate result of one (keyword, target) campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    pub keyword: String,
    pub target: String,
    pub checked_at: DateTime<Utc>,
    /// One entry per registered adapter, in registration order
    pub rankings: Vec<EngineOutcome>,
}

impl CampaignReport {
    /// Look up one engine's outcome by id.
    pub fn outcome_for(&self, engine: &str) -> Option<&EngineOutcome> {
        self.rankings.iter().find(|o| o.engine == engine)
    }

    /// The best (lowest) rank across all engines, if any engine found the target.
    pub fn best_rank(&self) -> Option<usize> {
        self.rankings.iter().filter_map(|o| o.rank).min()
    }
}
