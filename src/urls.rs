//! URL classification and normalization
//!
//! Cache keys are stored percent-decoded, and the shape of a URL decides
//! which partition (internal/external) may prune it during reconciliation.

use url::Url;

/// Percent-decode a URL for use as a cache key.
///
/// Decoding that would produce invalid UTF-8 leaves the input unchanged.
///
/// Known gap: keys are compared decoded while the fetch layer may operate on
/// the escaped form, so URLs containing encoded reserved characters can miss
/// the cache. Kept for compatibility with previously written cache files.
pub fn unescape(url: &str) -> String {
    match urlencoding::decode(url) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => url.to_string(),
    }
}

/// True iff the string is shaped like a fully qualified external URL
/// (absolute, with a host).
pub fn looks_external(url: &str) -> bool {
    Url::parse(url).map(|u| u.has_host()).unwrap_or(false)
}

/// True iff the string is shaped like a local reference rather than a fully
/// qualified URL.
pub fn looks_internal(url: &str) -> bool {
    !looks_external(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_decodes_percent_sequences() {
        assert_eq!(unescape("docs/a%20b.html"), "docs/a b.html");
        assert_eq!(unescape("http://x.test/caf%C3%A9"), "http://x.test/café");
    }

    #[test]
    fn test_unescape_plain_url_unchanged() {
        assert_eq!(unescape("docs/a.html"), "docs/a.html");
    }

    #[test]
    fn test_unescape_invalid_utf8_unchanged() {
        assert_eq!(unescape("docs/%FF.html"), "docs/%FF.html");
    }

    #[test]
    fn test_looks_external() {
        assert!(looks_external("http://example.com"));
        assert!(looks_external("https://example.com/a/b#frag"));
        assert!(looks_external("ftp://example.com/file"));
    }

    #[test]
    fn test_looks_internal() {
        assert!(looks_internal("docs/a.html"));
        assert!(looks_internal("../sibling.html"));
        assert!(looks_internal("/absolute/path.html"));
        assert!(looks_internal("#section"));
        // no host component
        assert!(looks_internal("mailto:someone@example.com"));
    }
}
