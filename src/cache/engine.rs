//! Run-scoped cache engine
//!
//! Composes configuration, the run clock, and the cache document behind a
//! small front: load once at startup, reconcile and record during the run,
//! save once at shutdown. Constructed without configuration, every
//! operation is a no-op and URL retrieval returns its input unchanged.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::cache::document::{CacheDocument, LinkObservation, LinkType};
use crate::cache::reconcile::detect_changes;
use crate::cache::store;
use crate::config::CacheConfig;
use crate::timeframe::parse_timeframe;

/// The caller-facing cache for one checking run.
///
/// `now` is fixed at construction and reused for every record write and
/// timeframe decision within the run, so behavior is reproducible under an
/// injected clock.
#[derive(Debug)]
pub struct LinkCache {
    enabled: bool,
    storage_path: PathBuf,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
    document: CacheDocument,
}

impl LinkCache {
    /// Build the engine for one run.
    ///
    /// `None` config disables caching entirely. Otherwise the timeframe is
    /// parsed (an invalid spec is fatal and propagates immediately), the
    /// storage directory is created if missing, and the persisted document
    /// is loaded.
    pub fn new(config: Option<&CacheConfig>, now: DateTime<Utc>) -> Result<Self> {
        let Some(config) = config else {
            return Ok(Self::disabled(now));
        };

        let cutoff = parse_timeframe(&config.timeframe, now)?;
        store::ensure_storage_dir(&config.storage_dir)?;
        let storage_path = config.storage_path();
        let document = store::load(&storage_path);

        Ok(Self {
            enabled: true,
            storage_path,
            cutoff,
            now,
            document,
        })
    }

    fn disabled(now: DateTime<Utc>) -> Self {
        Self {
            enabled: false,
            storage_path: PathBuf::new(),
            cutoff: now,
            now,
            document: CacheDocument::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn document(&self) -> &CacheDocument {
        &self.document
    }

    /// Reconcile the discovered URL set for one link type, returning the
    /// subset that needs a fresh check this run.
    ///
    /// Pass-through when caching is disabled or nothing is cached yet.
    pub fn retrieve_urls(
        &mut self,
        urls: &BTreeSet<String>,
        link_type: LinkType,
    ) -> BTreeSet<String> {
        if !self.enabled || self.document.is_empty() {
            return urls.clone();
        }
        detect_changes(&mut self.document, urls, link_type, self.cutoff, self.now)
    }

    /// Record one occurrence of an internal link. No-op when disabled.
    pub fn record_internal(
        &mut self,
        url: &str,
        observation: LinkObservation,
        found: Option<bool>,
    ) {
        if !self.enabled {
            return;
        }
        self.document.record_internal(url, observation, found, self.now);
    }

    /// Record the check result of an external link. No-op when disabled.
    pub fn record_external(
        &mut self,
        url: &str,
        filenames: &[String],
        status: Option<i32>,
        message: Option<String>,
    ) {
        if !self.enabled {
            return;
        }
        self.document
            .record_external(url, filenames, status, message, self.now);
    }

    /// Persist the document to the configured path. No-op when disabled.
    pub fn save(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        store::save(&self.document, &self.storage_path)
    }
}
