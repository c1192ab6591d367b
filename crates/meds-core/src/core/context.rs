// crates/meds-core/src/core/context.rs
// ============================================================================
// Module: MEDS UX Context
// Description: Derived heuristic feature vector consumed by rule evaluation.
// Purpose: Give guards a closed, typed set of context keys.
// Dependencies: crate::core::spec, serde, serde_json
// ============================================================================

//! ## Overview
//! The UX context is an ephemeral projection of a validated spec. It is never
//! persisted on its own. Guard predicates address its fields by their
//! camelCase names through [`UxContext::value_of`]; keys outside
//! [`UxContext::KEYS`] are rejected when the rulebook loads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::spec::Platform;

// ============================================================================
// SECTION: Content Type
// ============================================================================

/// Dominant content shape of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Tabular data.
    Table,
    /// Lists or card collections.
    List,
    /// A single item or form.
    Single,
}

impl ContentType {
    /// Returns the serialized content type label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::List => "list",
            Self::Single => "single",
        }
    }
}

// ============================================================================
// SECTION: UX Context
// ============================================================================

/// Heuristic features describing the current spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UxContext {
    /// Viewport platform.
    pub platform: Platform,
    /// Dominant content shape.
    pub content_type: ContentType,
    /// Number of form input components.
    pub form_fields: u32,
    /// Content area is narrowed by side chrome or a small screen.
    pub content_width_narrow: bool,
    /// Persistent navigation keeps the user's place.
    pub keep_context: bool,
    /// Actions on screen are reversible.
    pub reversible: bool,
    /// Primary input is touch.
    pub device_has_touch: bool,
    /// Placeholder: destructive intent is not yet detected.
    pub is_destructive: bool,
    /// Placeholder: blocking work is not yet detected.
    pub blocking: bool,
    /// Placeholder: progress knowledge is not yet detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_known: Option<bool>,
    /// Placeholder: floating action buttons are not yet considered.
    pub has_fab_on_screen: bool,
    /// Placeholder: empty states are not yet detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<bool>,
}

impl UxContext {
    /// Context keys addressable from guard predicates.
    pub const KEYS: [&'static str; 12] = [
        "platform",
        "contentType",
        "formFields",
        "contentWidthNarrow",
        "keepContext",
        "reversible",
        "deviceHasTouch",
        "isDestructive",
        "blocking",
        "progressKnown",
        "hasFabOnScreen",
        "emptyState",
    ];

    /// Returns the JSON value of a context field, or `None` when the key is
    /// unknown or the field is unset.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<Value> {
        match key {
            "platform" => Some(Value::from(self.platform.as_str())),
            "contentType" => Some(Value::from(self.content_type.as_str())),
            "formFields" => Some(Value::from(self.form_fields)),
            "contentWidthNarrow" => Some(Value::Bool(self.content_width_narrow)),
            "keepContext" => Some(Value::Bool(self.keep_context)),
            "reversible" => Some(Value::Bool(self.reversible)),
            "deviceHasTouch" => Some(Value::Bool(self.device_has_touch)),
            "isDestructive" => Some(Value::Bool(self.is_destructive)),
            "blocking" => Some(Value::Bool(self.blocking)),
            "progressKnown" => self.progress_known.map(Value::Bool),
            "hasFabOnScreen" => Some(Value::Bool(self.has_fab_on_screen)),
            "emptyState" => self.empty_state.map(Value::Bool),
            _ => None,
        }
    }
}
