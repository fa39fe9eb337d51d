//! Cache configuration
//!
//! The host link checker parses its own configuration file and hands the
//! cache section to this crate as a typed struct. Passing no configuration
//! at all disables caching: mutation and persistence become no-ops and URL
//! retrieval returns its input unchanged.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default storage directory, relative to the working directory.
pub const DEFAULT_STORAGE_DIR: &str = "tmp/.linkcache";

/// Default cache file name inside the storage directory.
pub const DEFAULT_CACHE_FILE: &str = "cache.json";

/// Default validity window for cached results.
pub const DEFAULT_TIMEFRAME: &str = "30d";

/// Cache configuration supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the cache file (created on demand).
    pub storage_dir: PathBuf,

    /// Cache file name within `storage_dir`.
    pub cache_file: String,

    /// How long a cached result stays valid, e.g. "6M", "2w", "3d", "12h".
    pub timeframe: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cache_file: DEFAULT_CACHE_FILE.to_string(),
            timeframe: DEFAULT_TIMEFRAME.to_string(),
        }
    }
}

impl CacheConfig {
    /// Full path of the cache file.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_dir.join(&self.cache_file)
    }

    /// Configuration rooted at a custom storage directory.
    pub fn with_storage_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            storage_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}
