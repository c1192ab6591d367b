// crates/meds-core/src/interfaces/mod.rs
// ============================================================================
// Module: MEDS Interfaces
// Description: Backend-agnostic interfaces for spec persistence.
// Purpose: Define the contract surface used by the pipeline to store output.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The pipeline hands integrated specs to a [`SpecStore`] keyed by their
//! content-derived [`SpecId`]. Implementations must fail closed on corrupted
//! or incompatible data rather than returning partial specs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::SpecId;
use crate::core::spec::DesignSpec;

// ============================================================================
// SECTION: Spec Store
// ============================================================================

/// Spec store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("spec store io error: {0}")]
    Io(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("spec store corruption: {0}")]
    Corrupt(String),
    /// Store data version is incompatible.
    #[error("spec store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("spec store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("spec store error: {0}")]
    Store(String),
}

/// Persistence collaborator for integrated specs.
pub trait SpecStore: Send + Sync {
    /// Loads an integrated spec by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when loading fails.
    fn load(&self, spec_id: &SpecId) -> Result<Option<DesignSpec>, StoreError>;

    /// Saves an integrated spec under its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when saving fails.
    fn save(&self, spec_id: &SpecId, spec: &DesignSpec) -> Result<(), StoreError>;
}
