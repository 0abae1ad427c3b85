// src/engines/mod.rs

//! Search engine backend adapters.
//!
//! Every backend is described by one [`EngineProfile`] value set (base URL,
//! pagination convention, extraction selectors, cookie requirement) consumed
//! by the single [`SerpEngine`] adapter. Adding a backend means adding a
//! profile, not a type.

mod google;
mod yahoo;

use std::sync::Arc;

use scraper::{Html, Selector};
use url::form_urlencoded;

use crate::error::{AppError, Result};
use crate::models::{PageResult, ResultItem};
use crate::utils;

/// Fully-built request descriptor for one result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Adapter the request belongs to, used for cookie-jar routing
    pub engine: String,
    /// Complete query URL
    pub url: String,
}

/// Contract every backend adapter satisfies.
///
/// Adapters are stateless: all polling progress lives in the orchestrator's
/// cursors, never here.
pub trait EngineAdapter: Send + Sync {
    /// Stable identifier; doubles as the CLI selector name.
    fn id(&self) -> &str;

    /// Listings per result page, used for global rank computation.
    fn page_size(&self) -> usize;

    /// Backend-specific page ceiling, when tighter than the campaign's.
    fn max_pages(&self) -> Option<usize> {
        None
    }

    /// Whether the backend needs a persistent cookie jar across pages.
    fn needs_cookies(&self) -> bool {
        false
    }

    /// Request to issue once at registration, for backends that only serve
    /// result pages to a primed session. `None` when no priming is needed.
    fn warmup_request(&self) -> Option<PageRequest> {
        None
    }

    /// Build the query URL for the given 1-based result page.
    ///
    /// Pure function of (keyword, page, adapter configuration): no side
    /// effects, no network access.
    fn build_page_request(&self, keyword: &str, page: usize) -> PageRequest;

    /// Parse raw page markup into listings.
    ///
    /// Fails with [`AppError::NoListings`] when the content has no
    /// recognizable result block. Individual malformed entries are skipped.
    fn extract_listings(&self, raw: &str) -> Result<PageResult>;

    /// 1-based in-page position whose URL host+path contains `target`.
    fn find_target_position(&self, page: &PageResult, target: &str) -> Option<usize> {
        page.iter()
            .find(|item| utils::url_contains(&item.url, target))
            .map(|item| item.position)
    }
}

/// How a backend addresses result pages past the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParam {
    /// `param=(page-1)*page_size`, omitted on page 1. Google convention.
    Offset(&'static str),
    /// `param=(page-1)*page_size+1`, omitted on page 1. Yahoo convention.
    FirstResult(&'static str),
}

/// CSS selectors that pull listings out of a backend's markup.
///
/// Positions are numbered contiguously among successfully parsed entries;
/// skipped (malformed) blocks do not leave gaps.
#[derive(Debug, Clone, Copy)]
pub struct ExtractRule {
    /// Matches one result block per listing
    pub block: &'static str,
    /// Matches the link inside a block
    pub link: &'static str,
}

/// One backend, fully described by configuration values.
#[derive(Debug, Clone)]
pub struct EngineProfile {
    pub id: &'static str,
    /// Scheme + host, trailing slash included
    pub base_url: &'static str,
    pub search_path: &'static str,
    pub query_param: &'static str,
    pub pagination: PageParam,
    pub extract: ExtractRule,
    pub page_size: usize,
    /// Tighter page ceiling than the campaign's, if the backend has one
    pub max_pages: Option<usize>,
    pub needs_cookies: bool,
    /// Fetch the front page once before querying, to pick up session cookies
    pub warmup: bool,
}

/// The profile-driven adapter used for every shipped backend.
pub struct SerpEngine {
    profile: EngineProfile,
}

impl SerpEngine {
    pub fn new(profile: EngineProfile) -> Self {
        Self { profile }
    }
}

impl EngineAdapter for SerpEngine {
    fn id(&self) -> &str {
        self.profile.id
    }

    fn page_size(&self) -> usize {
        self.profile.page_size
    }

    fn max_pages(&self) -> Option<usize> {
        self.profile.max_pages
    }

    fn needs_cookies(&self) -> bool {
        self.profile.needs_cookies
    }

    fn warmup_request(&self) -> Option<PageRequest> {
        self.profile.warmup.then(|| PageRequest {
            engine: self.profile.id.to_string(),
            url: self.profile.base_url.to_string(),
        })
    }

    fn build_page_request(&self, keyword: &str, page: usize) -> PageRequest {
        let p = &self.profile;
        let encoded: String = form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
        let mut url = format!("{}{}?{}={}", p.base_url, p.search_path, p.query_param, encoded);
        if page > 1 {
            match p.pagination {
                PageParam::Offset(param) => {
                    url.push_str(&format!("&{}={}", param, (page - 1) * p.page_size));
                }
                PageParam::FirstResult(param) => {
                    url.push_str(&format!("&{}={}", param, (page - 1) * p.page_size + 1));
                }
            }
        }
        PageRequest {
            engine: p.id.to_string(),
            url,
        }
    }

    fn extract_listings(&self, raw: &str) -> Result<PageResult> {
        let rule = &self.profile.extract;
        let block_sel = parse_selector(rule.block)?;
        let link_sel = parse_selector(rule.link)?;

        let document = Html::parse_document(raw);
        let mut blocks = 0usize;
        let mut items: PageResult = Vec::new();

        for block in document.select(&block_sel) {
            blocks += 1;
            // Blocks without a usable link are skipped, not fatal.
            let Some(link) = block.select(&link_sel).next() else {
                continue;
            };
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let headline = link.text().collect::<String>().trim().to_string();
            items.push(ResultItem {
                position: items.len() + 1,
                url: href.to_string(),
                headline,
            });
        }

        if blocks == 0 {
            return Err(AppError::NoListings);
        }
        Ok(items)
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn known_profiles() -> Vec<EngineProfile> {
    vec![
        google::google_com(),
        google::google_dk(),
        google::google_uk(),
        yahoo::yahoo_com(),
        yahoo::yahoo_dk(),
        yahoo::yahoo_uk(),
    ]
}

/// Known backend names, for CLI help and error messages.
pub fn known_names() -> Vec<&'static str> {
    known_profiles().iter().map(|p| p.id).collect()
}

/// All backends known to this build, in registry order.
pub fn all() -> Vec<Arc<dyn EngineAdapter>> {
    known_profiles()
        .into_iter()
        .map(|p| Arc::new(SerpEngine::new(p)) as Arc<dyn EngineAdapter>)
        .collect()
}

/// Resolve requested backend names, or every known backend when none given.
pub fn select(names: &[String]) -> Result<Vec<Arc<dyn EngineAdapter>>> {
    if names.is_empty() {
        return Ok(all());
    }

    let mut engines: Vec<Arc<dyn EngineAdapter>> = Vec::with_capacity(names.len());
    for name in names {
        let profile = known_profiles()
            .into_iter()
            .find(|p| p.id == name)
            .ok_or_else(|| {
                AppError::config(format!(
                    "unknown engine '{}' (known engines: {})",
                    name,
                    known_names().join(", ")
                ))
            })?;
        engines.push(Arc::new(SerpEngine::new(profile)));
    }
    Ok(engines)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Bare profile against a fake host, for orchestration tests.
    pub fn test_profile(id: &'static str) -> EngineProfile {
        EngineProfile {
            id,
            base_url: "http://serp.test/",
            search_path: "search",
            query_param: "q",
            pagination: PageParam::Offset("start"),
            extract: ExtractRule {
                block: "h3.r",
                link: "a",
            },
            page_size: 10,
            max_pages: None,
            needs_cookies: false,
            warmup: false,
        }
    }

    /// Minimal result page markup with one block per URL, in order.
    pub fn serp_page(urls: &[&str]) -> String {
        let blocks: String = urls
            .iter()
            .map(|u| format!("<h3 class=\"r\"><a href=\"{u}\">Listing for {u}</a></h3>"))
            .collect();
        format!("<html><body><div id=\"res\">{blocks}</div></body></html>")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{serp_page, test_profile};
    use super::*;

    #[test]
    fn test_build_page_request_is_deterministic() {
        let engine = SerpEngine::new(test_profile("t"));
        let a = engine.build_page_request("rust web crawler", 4);
        let b = engine.build_page_request("rust web crawler", 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_page_request_encodes_keyword() {
        let engine = SerpEngine::new(test_profile("t"));
        let request = engine.build_page_request("rust & crates", 1);
        assert_eq!(request.url, "http://serp.test/search?q=rust+%26+crates");
    }

    #[test]
    fn test_first_page_has_no_page_param() {
        let engine = SerpEngine::new(test_profile("t"));
        assert!(!engine.build_page_request("kw", 1).url.contains("start="));
        assert!(
            engine
                .build_page_request("kw", 2)
                .url
                .ends_with("&start=10")
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let engine = SerpEngine::new(test_profile("t"));
        let page = serp_page(&["https://a.test/x", "https://b.test/y"]);
        let first = engine.extract_listings(&page).unwrap();
        let second = engine.extract_listings(&page).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].position, 1);
        assert_eq!(first[1].position, 2);
    }

    #[test]
    fn test_extraction_skips_malformed_blocks() {
        let engine = SerpEngine::new(test_profile("t"));
        let raw = "<html><body>\
            <h3 class=\"r\"><a href=\"https://a.test/\">First</a></h3>\
            <h3 class=\"r\">no link here</h3>\
            <h3 class=\"r\"><a href=\"https://c.test/\">Third</a></h3>\
            </body></html>";
        let items = engine.extract_listings(raw).unwrap();
        // Contiguous numbering among parsed entries only.
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].url, "https://a.test/");
        assert_eq!(items[1].position, 2);
        assert_eq!(items[1].url, "https://c.test/");
    }

    #[test]
    fn test_no_result_block_is_an_error() {
        let engine = SerpEngine::new(test_profile("t"));
        let err = engine
            .extract_listings("<html><body><p>blocked</p></body></html>")
            .unwrap_err();
        assert!(err.is_soft_miss());
    }

    #[test]
    fn test_all_blocks_malformed_is_empty_not_error() {
        let engine = SerpEngine::new(test_profile("t"));
        let raw = "<html><body><h3 class=\"r\">bare text</h3></body></html>";
        let items = engine.extract_listings(raw).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_find_target_matches_host_and_path() {
        let engine = SerpEngine::new(test_profile("t"));
        let page = engine
            .extract_listings(&serp_page(&[
                "https://first.test/",
                "https://www.example.com/about",
                "https://example.com.phish.test/?note=example.org",
            ]))
            .unwrap();

        assert_eq!(engine.find_target_position(&page, "example.com"), Some(2));
        assert_eq!(engine.find_target_position(&page, "missing.test"), None);
        // Query strings are not part of the match surface.
        assert_eq!(engine.find_target_position(&page, "example.org"), None);
    }

    #[test]
    fn test_select_unknown_engine_is_config_error() {
        let err = select(&["altavista".to_string()]).err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("altavista"));
    }

    #[test]
    fn test_select_empty_returns_all_known() {
        assert_eq!(select(&[]).unwrap().len(), known_names().len());
    }
}
