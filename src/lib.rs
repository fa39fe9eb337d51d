//! linkcache - persistent result cache for document link checkers
//!
//! linkcache provides:
//! - A versioned, serializable cache document for internal and external link results
//! - Timeframe parsing ("6M", "2w", "3d", "12h") with calendar-aware month arithmetic
//! - Reconciliation of freshly discovered URLs against cached records
//!   (additions, deletions, time-based expiry)
//! - A run-scoped engine with load-at-start / save-at-end persistence
//!
//! The host link checker owns document scanning, network fetching, and
//! reporting; this crate only decides which URLs still need checking and
//! remembers the results it is handed.

pub mod cache;
pub mod config;
pub mod timeframe;
pub mod urls;

pub use cache::document::{
    CacheDocument, ExternalRecord, InternalRecord, LinkObservation, LinkType, CACHE_VERSION,
};
pub use cache::engine::LinkCache;
pub use cache::reconcile::detect_changes;
pub use config::CacheConfig;
pub use timeframe::{parse_timeframe, within_timeframe, TimeframeError};
