//! Utility functions and helpers.

use url::Url;

/// True when `target` occurs in the host+path portion of `link`.
///
/// Query strings and fragments are excluded so a site name smuggled into
/// someone else's tracking parameters does not count as a hit.
pub fn url_contains(link: &str, target: &str) -> bool {
    match Url::parse(link) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            format!("{}{}", host, parsed.path()).contains(target)
        }
        // Some backends emit relative or scheme-less links; fall back to the
        // raw string for those.
        Err(_) => link.contains(target),
    }
}

/// Extract the domain from a URL string.
pub fn get_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_contains_host() {
        assert!(url_contains("https://www.example.com/page", "example.com"));
        assert!(!url_contains("https://www.example.com/page", "other.com"));
    }

    #[test]
    fn test_url_contains_path() {
        assert!(url_contains("https://host.test/example.com/x", "example.com"));
    }

    #[test]
    fn test_url_contains_ignores_query() {
        assert!(!url_contains(
            "https://host.test/page?ref=example.com",
            "example.com"
        ));
    }

    #[test]
    fn test_url_contains_relative_fallback() {
        assert!(url_contains("/url?q=https://example.com/", "example.com"));
    }

    #[test]
    fn test_get_domain() {
        assert_eq!(
            get_domain("https://sub.example.com:8080/path"),
            Some("sub.example.com".to_string())
        );
        assert_eq!(get_domain("not a url"), None);
    }
}
