//! Per-adapter polling state machine.

use serde::Serialize;

/// What put a cursor into the `Failed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport or backend failure while fetching a page
    Fetch,
    /// The backend could not be brought up for the campaign
    Registration,
}

/// Error recorded on a failed cursor.
#[derive(Debug, Clone, Serialize)]
pub struct CursorError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Lifecycle of a cursor. Transitions are one-directional: `Active` moves to
/// exactly one of the terminal states and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CursorStatus {
    /// Still polling pages
    Active,
    /// Target located; `found_rank` is set
    Found,
    /// Page ceiling reached without a match
    Exhausted,
    /// Fetch or registration failure; excluded from further rounds
    Failed,
}

/// Polling progress and outcome for one adapter within one campaign.
///
/// Owned exclusively by the orchestrator and mutated only through the methods
/// below, so the status invariants hold by construction.
#[derive(Debug, Clone)]
pub struct PollCursor {
    adapter_id: String,
    current_page: usize,
    max_pages: usize,
    page_size: usize,
    found_rank: Option<usize>,
    status: CursorStatus,
    last_error: Option<CursorError>,
}

impl PollCursor {
    /// Create a fresh cursor. The first `advance` call moves it to page 1.
    pub fn new(adapter_id: impl Into<String>, max_pages: usize, page_size: usize) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            current_page: 0,
            max_pages,
            page_size,
            found_rank: None,
            status: CursorStatus::Active,
            last_error: None,
        }
    }

    pub fn adapter_id(&self) -> &str {
        &self.adapter_id
    }

    pub fn status(&self) -> CursorStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == CursorStatus::Active
    }

    /// Number of pages attempted so far.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Global rank of the target, once found.
    pub fn found_rank(&self) -> Option<usize> {
        self.found_rank
    }

    pub fn last_error(&self) -> Option<&CursorError> {
        self.last_error.as_ref()
    }

    /// Move to the next page number.
    ///
    /// Returns the 1-based page to fetch, or `None` when the cursor is
    /// terminal or the ceiling has been passed (the cursor then exhausts).
    /// No fetch may be issued for a cursor that returned `None`.
    pub fn advance(&mut self) -> Option<usize> {
        if self.status != CursorStatus::Active {
            return None;
        }
        self.current_page += 1;
        if self.current_page > self.max_pages {
            self.status = CursorStatus::Exhausted;
            return None;
        }
        Some(self.current_page)
    }

    /// Record a hit at `position_in_page` and compute the global rank.
    ///
    /// The rank is `(current_page - 1) * page_size + position_in_page`,
    /// computed exactly once.
    pub fn mark_found(&mut self, position_in_page: usize) {
        if self.status != CursorStatus::Active {
            return;
        }
        self.found_rank = Some((self.current_page - 1) * self.page_size + position_in_page);
        self.status = CursorStatus::Found;
    }

    /// Record a non-recoverable failure. Terminal.
    pub fn mark_failed(&mut self, kind: ErrorKind, message: impl Into<String>) {
        if self.status != CursorStatus::Active {
            return;
        }
        self.last_error = Some(CursorError {
            kind,
            message: message.into(),
        });
        self.status = CursorStatus::Failed;
    }

    /// Close out a page that produced no hit.
    ///
    /// The cursor exhausts once the final allowed page has been inspected;
    /// otherwise it stays active for the next round.
    pub fn record_miss(&mut self) {
        if self.status == CursorStatus::Active && self.current_page >= self.max_pages {
            self.status = CursorStatus::Exhausted;
        }
    }
}
