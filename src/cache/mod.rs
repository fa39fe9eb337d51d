//! Cache module - versioned link-check result cache
//!
//! Provides:
//! - The serializable cache document (internal/external link records)
//! - Storage (version-gated load, save, clear)
//! - Reconciliation of discovered URLs against cached records
//! - The run-scoped engine front

pub mod document;
pub mod engine;
pub mod reconcile;
pub mod store;
