//! Cache store - Read/write the persisted cache document
//!
//! Loading is infallible by design: a missing, blank, unparseable,
//! unversioned, or version-mismatched cache file yields a fresh empty
//! document and the run simply rechecks everything.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cache::document::{CacheDocument, CACHE_VERSION};

/// Ensure the storage directory exists.
pub fn ensure_storage_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create cache directory: {:?}", dir))?;
    }
    Ok(())
}

/// Load the cache document from `path`.
///
/// Only a document whose `version` equals [`CACHE_VERSION`] is returned as
/// parsed; everything else is discarded wholesale. There is no migration in
/// either direction, so a newer-versioned file read by an older engine is
/// wiped just like a legacy one.
pub fn load(path: &Path) -> CacheDocument {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return CacheDocument::new(),
    };
    if content.trim().is_empty() {
        return CacheDocument::new();
    }

    match serde_json::from_str::<CacheDocument>(&content) {
        Ok(doc) if doc.version == CACHE_VERSION => doc,
        Ok(doc) => {
            log::info!(
                "cache file {:?} has version {} (current is {}), starting fresh",
                path,
                doc.version,
                CACHE_VERSION
            );
            CacheDocument::new()
        }
        Err(err) => {
            log::warn!("cache file {:?} is unreadable ({}), starting fresh", path, err);
            CacheDocument::new()
        }
    }
}

/// Write the cache document to `path` as pretty JSON.
///
/// Plain overwrite; atomic replacement is the caller's concern.
pub fn save(doc: &CacheDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json).with_context(|| format!("Failed to write cache file: {:?}", path))?;
    Ok(())
}

/// Remove the cache file if present.
pub fn clear(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove cache file: {:?}", path))?;
    }
    Ok(())
}
