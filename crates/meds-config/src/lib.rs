// crates/meds-config/src/lib.rs
// ============================================================================
// Module: MEDS Config
// Description: Configuration model, loading, and schema for meds.toml.
// Purpose: Give the CLI and embedding callers one fail-closed config surface.
// Dependencies: meds-core, meds-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `meds-config` owns the `meds.toml` model: rulebook selection, input
//! limits, audit routing, spec persistence, and evaluation overrides. Every
//! section has runtime defaults and a `validate()` step, and
//! [`config_schema`] publishes the same defaults as a JSON schema.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use schema::config_schema;
