//! Yahoo backend profiles.
//!
//! Yahoo addresses pages by the ordinal of their first result (`b=11` for
//! page 2) and serves results without session cookies.

use super::{EngineProfile, ExtractRule, PageParam};

const EXTRACT: ExtractRule = ExtractRule {
    block: "div.res",
    link: "h3 a",
};

fn yahoo(id: &'static str, base_url: &'static str) -> EngineProfile {
    EngineProfile {
        id,
        base_url,
        search_path: "search",
        query_param: "p",
        pagination: PageParam::FirstResult("b"),
        extract: EXTRACT,
        page_size: 10,
        max_pages: None,
        needs_cookies: false,
        warmup: false,
    }
}

pub(super) fn yahoo_com() -> EngineProfile {
    yahoo("yahoo-com", "http://search.yahoo.com/")
}

pub(super) fn yahoo_dk() -> EngineProfile {
    yahoo("yahoo-dk", "http://dk.search.yahoo.com/")
}

pub(super) fn yahoo_uk() -> EngineProfile {
    yahoo("yahoo-uk", "http://uk.search.yahoo.com/")
}
