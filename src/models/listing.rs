//! Extracted listing data structures.

use serde::{Deserialize, Serialize};

/// One listing entry extracted from a result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    /// 1-based position within its own page. Global rank is computed by the
    /// orchestrator from page number and page size, never here.
    pub position: usize,

    /// Link the listing points at
    pub url: String,

    /// Listing headline text
    pub headline: String,
}

/// All listings extracted from one fetched page, in page order.
///
/// May be empty when every entry on the page was malformed; empty is distinct
/// from a fetch failure and from a page with no recognizable result block.
pub type PageResult = Vec<ResultItem>;
