// crates/meds-core/src/core/violation.rs
// ============================================================================
// Module: MEDS Spec Violations
// Description: Structured validation failures.
// Purpose: Report every violated constraint with its JSON path.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Validation failure is data, not an error: the validator returns the full
//! list of [`SpecViolation`] values so callers can log or run a repair pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecViolation {
    /// JSON pointer-style path (for example `/components/2/type`).
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

impl SpecViolation {
    /// Creates a violation.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SpecViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
