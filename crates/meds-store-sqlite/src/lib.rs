// crates/meds-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Spec Store
// Description: Durable SpecStore backend using SQLite.
// Purpose: Persist integrated design specs under their content-derived ids.
// Dependencies: meds-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed [`SpecStore`] implementation that
//! persists canonical integrated-spec snapshots in a versioned history table.
//! Loads re-verify the stored hash and the content-derived id, so a tampered
//! row fails closed instead of returning a different spec.
//!
//! [`SpecStore`]: meds_core::SpecStore

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_SPEC_BYTES;
pub use store::SqliteSpecStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
