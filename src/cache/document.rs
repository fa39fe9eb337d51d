//! Cache document model
//!
//! The versioned, serializable record of link-check results. Internal links
//! accumulate one observation per occurrence across the scanned documents;
//! external links keep the latest check outcome plus the current set of
//! referencing files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::urls::unescape;

/// Current cache format version. A persisted document with any other
/// version (or none at all) is discarded wholesale on load.
pub const CACHE_VERSION: u32 = 2;

/// The two link partitions of the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Internal,
    External,
}

impl LinkType {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkType::Internal => "internal",
            LinkType::External => "external",
        }
    }
}

/// One occurrence of an internal link in a scanned document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkObservation {
    /// Identifier of the referencing document/element.
    pub source: String,

    /// File path being scanned when the link was encountered.
    pub current_path: String,

    /// Line number of the reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Base URL used to resolve the reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Whether resolution succeeded; absent until evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<bool>,
}

impl LinkObservation {
    pub fn new(source: impl Into<String>, current_path: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            current_path: current_path.into(),
            line: None,
            base_url: None,
            found: None,
        }
    }
}

/// Cached state of an internal link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalRecord {
    /// When this URL was last (re)checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    /// Observations accumulated across documents, in encounter order.
    #[serde(default)]
    pub metadata: Vec<LinkObservation>,
}

/// Cached state of an external link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRecord {
    /// When this URL was last checked over the network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,

    /// Result code of the last check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    /// Human-readable result detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Files currently referencing this URL (replaced on every update).
    #[serde(default)]
    pub metadata: Vec<String>,
}

/// The full persisted cache document.
///
/// Keys of both partitions are percent-decoded URL strings. `version` is a
/// required field: a persisted document missing it fails deserialization and
/// the store treats it as unusable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument {
    pub version: u32,

    #[serde(default)]
    pub internal: BTreeMap<String, InternalRecord>,

    #[serde(default)]
    pub external: BTreeMap<String, ExternalRecord>,
}

impl Default for CacheDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheDocument {
    /// Fresh empty document at the current format version.
    pub fn new() -> Self {
        Self {
            version: CACHE_VERSION,
            internal: BTreeMap::new(),
            external: BTreeMap::new(),
        }
    }

    /// True when neither partition holds any URL.
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }

    /// Number of cached URLs in one partition.
    pub fn len(&self, link_type: LinkType) -> usize {
        match link_type {
            LinkType::Internal => self.internal.len(),
            LinkType::External => self.external.len(),
        }
    }

    pub fn contains(&self, link_type: LinkType, url: &str) -> bool {
        match link_type {
            LinkType::Internal => self.internal.contains_key(url),
            LinkType::External => self.external.contains_key(url),
        }
    }

    /// Cached URLs of one partition, in key order.
    pub fn urls_of(&self, link_type: LinkType) -> Vec<String> {
        match link_type {
            LinkType::Internal => self.internal.keys().cloned().collect(),
            LinkType::External => self.external.keys().cloned().collect(),
        }
    }

    /// Last-checked time of a cached URL, if any.
    pub fn time_of(&self, link_type: LinkType, url: &str) -> Option<DateTime<Utc>> {
        match link_type {
            LinkType::Internal => self.internal.get(url).and_then(|r| r.time),
            LinkType::External => self.external.get(url).and_then(|r| r.time),
        }
    }

    pub fn remove(&mut self, link_type: LinkType, url: &str) -> bool {
        match link_type {
            LinkType::Internal => self.internal.remove(url).is_some(),
            LinkType::External => self.external.remove(url).is_some(),
        }
    }

    /// Record one occurrence of an internal link.
    ///
    /// Creates the record (checked at `now`) on first sight, then appends
    /// the observation with its `found` field set from the argument. Prior
    /// observations are never replaced.
    pub fn record_internal(
        &mut self,
        url: &str,
        mut observation: LinkObservation,
        found: Option<bool>,
        now: DateTime<Utc>,
    ) {
        let record = self
            .internal
            .entry(unescape(url))
            .or_insert_with(|| InternalRecord {
                time: Some(now),
                metadata: Vec::new(),
            });
        observation.found = found;
        record.metadata.push(observation);
    }

    /// Record the check result of an external link.
    ///
    /// Creates the record (checked at `now`, with the given status/message)
    /// on first sight. The filename set is replaced on every call so it
    /// reflects the current referencing documents; `status` and `message`
    /// are only set at creation time and later calls for the same URL leave
    /// them untouched.
    pub fn record_external(
        &mut self,
        url: &str,
        filenames: &[String],
        status: Option<i32>,
        message: Option<String>,
        now: DateTime<Utc>,
    ) {
        let record = self
            .external
            .entry(unescape(url))
            .or_insert_with(|| ExternalRecord {
                time: Some(now),
                status,
                message,
                metadata: Vec::new(),
            });
        record.metadata = filenames.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_new_document_is_empty_at_current_version() {
        let doc = CacheDocument::new();
        assert_eq!(doc.version, CACHE_VERSION);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_record_internal_appends_observations() {
        let mut doc = CacheDocument::new();
        doc.record_internal(
            "docs/a.html",
            LinkObservation::new("index.html", "index.html"),
            Some(true),
            now(),
        );
        doc.record_internal(
            "docs/a.html",
            LinkObservation::new("guide.html", "guide.html"),
            None,
            now(),
        );

        let record = &doc.internal["docs/a.html"];
        assert_eq!(record.time, Some(now()));
        assert_eq!(record.metadata.len(), 2);
        assert_eq!(record.metadata[0].found, Some(true));
        assert_eq!(record.metadata[1].found, None);
    }

    #[test]
    fn test_record_external_replaces_filenames() {
        let mut doc = CacheDocument::new();
        doc.record_external(
            "http://x.test",
            &["a.html".to_string(), "b.html".to_string()],
            Some(200),
            Some("OK".to_string()),
            now(),
        );
        doc.record_external("http://x.test", &["c.html".to_string()], Some(404), None, now());

        let record = &doc.external["http://x.test"];
        assert_eq!(record.metadata, vec!["c.html".to_string()]);
        // status/message stay as written at creation
        assert_eq!(record.status, Some(200));
        assert_eq!(record.message, Some("OK".to_string()));
    }

    #[test]
    fn test_record_keys_are_unescaped() {
        let mut doc = CacheDocument::new();
        doc.record_internal(
            "docs/a%20b.html",
            LinkObservation::new("index.html", "index.html"),
            None,
            now(),
        );
        assert!(doc.contains(LinkType::Internal, "docs/a b.html"));
        assert!(!doc.contains(LinkType::Internal, "docs/a%20b.html"));
    }

    #[test]
    fn test_optional_observation_fields_skip_serialization() {
        let observation = LinkObservation::new("index.html", "index.html");
        let json = serde_json::to_value(&observation).unwrap();
        assert_eq!(json.get("source").unwrap(), "index.html");
        assert!(json.get("line").is_none());
        assert!(json.get("base_url").is_none());
        assert!(json.get("found").is_none());
    }

    #[test]
    fn test_document_wire_shape() {
        let mut doc = CacheDocument::new();
        let mut observation = LinkObservation::new("index.html", "index.html");
        observation.line = Some(12);
        doc.record_internal("docs/a.html", observation, Some(true), now());
        doc.record_external(
            "http://x.test",
            &["index.html".to_string()],
            Some(200),
            Some("OK".to_string()),
            now(),
        );

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["version"], CACHE_VERSION);
        assert!(json["internal"]["docs/a.html"]["time"].is_string());
        assert_eq!(json["internal"]["docs/a.html"]["metadata"][0]["line"], 12);
        assert_eq!(json["external"]["http://x.test"]["status"], 200);
        assert_eq!(json["external"]["http://x.test"]["metadata"][0], "index.html");
    }

    #[test]
    fn test_partition_accessors() {
        let mut doc = CacheDocument::new();
        doc.record_internal(
            "docs/a.html",
            LinkObservation::new("index.html", "index.html"),
            None,
            now(),
        );
        doc.record_external("http://x.test", &[], Some(200), None, now());

        assert_eq!(doc.len(LinkType::Internal), 1);
        assert_eq!(doc.len(LinkType::External), 1);
        assert_eq!(doc.urls_of(LinkType::Internal), vec!["docs/a.html".to_string()]);
        assert_eq!(doc.time_of(LinkType::External, "http://x.test"), Some(now()));
        assert_eq!(doc.time_of(LinkType::External, "http://missing.test"), None);

        assert!(doc.remove(LinkType::Internal, "docs/a.html"));
        assert!(!doc.remove(LinkType::Internal, "docs/a.html"));
        assert!(!doc.contains(LinkType::Internal, "docs/a.html"));
    }
}
