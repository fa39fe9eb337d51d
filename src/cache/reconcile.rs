//! Reconciliation - merge a freshly discovered URL set into the cache
//!
//! One pass per link type and run: first-time URLs join the needs-check set,
//! cached URLs that vanished from the scan are pruned (only when their shape
//! belongs to this partition), and entries past the expiry window are queued
//! for a recheck while keeping their cached metadata available.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::cache::document::{CacheDocument, LinkType};
use crate::timeframe::within_timeframe;
use crate::urls::{looks_external, looks_internal, unescape};

/// Compute the subset of `found_urls` (plus expired cached URLs) that needs
/// a fresh check, pruning cache entries no longer found in the scan.
///
/// An empty `found_urls` returns an empty set and leaves the document
/// untouched, so a degenerate scan never wipes the cache.
pub fn detect_changes(
    doc: &mut CacheDocument,
    found_urls: &BTreeSet<String>,
    link_type: LinkType,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
) -> BTreeSet<String> {
    let mut needs_check = BTreeSet::new();
    if found_urls.is_empty() {
        return needs_check;
    }

    // First-time URLs
    for url in found_urls {
        if !doc.contains(link_type, url) {
            needs_check.insert(url.clone());
        }
    }
    let additions = needs_check.len();

    // Cached URLs that vanished from the scan. Keys whose shape belongs to
    // the other partition are left for that partition's pass. Shape is
    // judged on the unescaped key; membership is compared verbatim (see
    // `urls::unescape` for the known escaped/unescaped gap).
    let mut removals = 0usize;
    for key in doc.urls_of(link_type) {
        if found_urls.contains(key.as_str()) {
            continue;
        }
        if shape_matches(&unescape(&key), link_type) && doc.remove(link_type, &key) {
            removals += 1;
        }
    }
    log::debug!(
        "{} {} links added, {} removed",
        additions,
        link_type.as_str(),
        removals
    );

    // Entries past the expiry window. The record stays in the document so
    // its metadata remains available as bootstrap for the recheck.
    let mut expirations = 0usize;
    for key in doc.urls_of(link_type) {
        if !within_timeframe(doc.time_of(link_type, &key), cutoff, now) && needs_check.insert(key)
        {
            expirations += 1;
        }
    }
    if expirations > 0 {
        log::debug!(
            "{} {} links expired, queued for recheck",
            expirations,
            link_type.as_str()
        );
    }

    needs_check
}

fn shape_matches(url: &str, link_type: LinkType) -> bool {
    match link_type {
        LinkType::Internal => looks_internal(url),
        LinkType::External => looks_external(url),
    }
}
