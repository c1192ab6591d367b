// crates/meds-core/src/core/identifiers.rs
// ============================================================================
// Module: MEDS Identifiers
// Description: Opaque identifiers for specs, components, rules, and policies.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque and serialize as plain strings. Validation of
//! uniqueness happens at the rulebook and spec boundaries rather than inside
//! these wrappers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Macro
// ============================================================================

/// Declares a transparent string identifier with the shared helper impls.
macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

string_identifier! {
    /// Opaque identifier of a persisted, integrated spec.
    SpecId
}

string_identifier! {
    /// Component identifier within a design spec.
    ComponentId
}

string_identifier! {
    /// Rule identifier within a rulebook policy.
    RuleId
}

string_identifier! {
    /// Policy identifier within a rulebook.
    PolicyId
}

impl PolicyId {
    /// Sentinel policy id reported when no policy matches the platform.
    pub const NONE: &'static str = "none";

    /// Returns the sentinel "no policy" identifier.
    #[must_use]
    pub fn none() -> Self {
        Self::new(Self::NONE)
    }

    /// Returns true when this is the sentinel "no policy" identifier.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }
}
