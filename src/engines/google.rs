//! Google backend profiles.
//!
//! All variants share the `start` offset pagination and the classic `h3.r`
//! result block markup. Google only serves stable result pages to a session
//! with cookies, so every profile keeps a jar; the national front ends
//! additionally need one front-page visit before the first query.

use super::{EngineProfile, ExtractRule, PageParam};

const EXTRACT: ExtractRule = ExtractRule {
    block: "h3.r",
    link: "a",
};

fn google(id: &'static str, base_url: &'static str, warmup: bool) -> EngineProfile {
    EngineProfile {
        id,
        base_url,
        search_path: "search",
        query_param: "q",
        pagination: PageParam::Offset("start"),
        extract: EXTRACT,
        page_size: 10,
        max_pages: None,
        needs_cookies: true,
        warmup,
    }
}

pub(super) fn google_com() -> EngineProfile {
    google("google-com", "http://www.google.com/", false)
}

pub(super) fn google_dk() -> EngineProfile {
    google("google-dk", "http://www.google.dk/", true)
}

pub(super) fn google_uk() -> EngineProfile {
    google("google-uk", "http://www.google.co.uk/", true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::{EngineAdapter, SerpEngine};

    #[test]
    fn test_pagination_uses_start_offset() {
        let engine = SerpEngine::new(google_com());
        assert_eq!(
            engine.build_page_request("seo tools", 1).url,
            "http://www.google.com/search?q=seo+tools"
        );
        assert_eq!(
            engine.build_page_request("seo tools", 3).url,
            "http://www.google.com/search?q=seo+tools&start=20"
        );
    }

    #[test]
    fn test_national_profiles_warm_up() {
        let dk = SerpEngine::new(google_dk());
        let warmup = dk.warmup_request().unwrap();
        assert_eq!(warmup.url, "http://www.google.dk/");
        assert_eq!(warmup.engine, "google-dk");

        assert!(SerpEngine::new(google_com()).warmup_request().is_none());
    }

    #[test]
    fn test_extracts_classic_result_blocks() {
        let engine = SerpEngine::new(google_com());
        let raw = r#"<html><body>
            <h3 class="r"><a href="https://www.rust-lang.org/">Rust Programming Language</a></h3>
            <h3 class="r"><a href="https://doc.rust-lang.org/book/">The Book</a></h3>
        </body></html>"#;
        let items = engine.extract_listings(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].headline, "Rust Programming Language");
        assert_eq!(
            engine.find_target_position(&items, "rust-lang.org"),
            Some(1)
        );
    }
}
