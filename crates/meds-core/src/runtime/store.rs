// crates/meds-core/src/runtime/store.rs
// ============================================================================
// Module: MEDS In-Memory Store
// Description: Simple in-memory spec store for tests and local runs.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides an in-memory implementation of [`SpecStore`] for
//! tests and the CLI's non-persistent runs. It is not intended for
//! production use; see `meds-store-sqlite` for a durable store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::identifiers::SpecId;
use crate::core::spec::DesignSpec;
use crate::interfaces::SpecStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// In-memory spec store.
#[derive(Debug, Default, Clone)]
pub struct InMemorySpecStore {
    /// Spec map protected by a mutex.
    specs: Arc<Mutex<BTreeMap<SpecId, DesignSpec>>>,
}

impl InMemorySpecStore {
    /// Creates a new in-memory spec store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            specs: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Returns the number of stored specs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Store`] when the mutex is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        let guard =
            self.specs.lock().map_err(|_| StoreError::Store("spec store mutex poisoned".to_string()))?;
        Ok(guard.len())
    }

    /// Returns true when no spec is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Store`] when the mutex is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl SpecStore for InMemorySpecStore {
    fn load(&self, spec_id: &SpecId) -> Result<Option<DesignSpec>, StoreError> {
        let guard =
            self.specs.lock().map_err(|_| StoreError::Store("spec store mutex poisoned".to_string()))?;
        Ok(guard.get(spec_id).cloned())
    }

    fn save(&self, spec_id: &SpecId, spec: &DesignSpec) -> Result<(), StoreError> {
        self.specs
            .lock()
            .map_err(|_| StoreError::Store("spec store mutex poisoned".to_string()))?
            .insert(spec_id.clone(), spec.clone());
        Ok(())
    }
}
