// crates/meds-core/src/runtime/context.rs
// ============================================================================
// Module: MEDS Context Deriver
// Description: Heuristic projection of a validated spec into a UX context.
// Purpose: Produce the feature vector consumed by rule evaluation.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! [`derive_context`] is total and read-only. It never consults the rulebook.
//! `isDestructive`, `blocking`, `progressKnown`, `hasFabOnScreen` and
//! `emptyState` are fixed conservative placeholders until richer analysis
//! exists.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::context::ContentType;
use crate::core::context::UxContext;
use crate::core::spec::ComponentType;
use crate::core::spec::DesignSpec;
use crate::core::spec::Platform;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Id substrings that mark an action as destructive.
const DESTRUCTIVE_ID_MARKERS: [&str; 2] = ["delete", "remove"];

// ============================================================================
// SECTION: Derivation
// ============================================================================

/// Derives the UX context from a validated spec.
#[must_use]
pub fn derive_context(spec: &DesignSpec) -> UxContext {
    let platform = spec.viewport_profile.platform;
    let is_mobile = platform == Platform::Mobile;

    let content_type = if spec.has_component(ComponentType::Table) {
        ContentType::Table
    } else if spec.components.iter().any(|component| component.component_type.is_collection()) {
        ContentType::List
    } else {
        ContentType::Single
    };

    let input_count = spec.components.iter().filter(|component| component.component_type.is_form_input()).count();
    let form_fields = u32::try_from(input_count).unwrap_or(u32::MAX);

    let has_side_chrome = spec.has_component(ComponentType::Sidebar) || spec.has_component(ComponentType::Drawer);
    let has_persistent_nav = spec.has_component(ComponentType::Sidebar)
        || spec.components.iter().any(|component| component.component_type.is_top_navigation());

    let destructive = spec.components.iter().any(|component| {
        let id = component.id.as_str().to_lowercase();
        DESTRUCTIVE_ID_MARKERS.iter().any(|marker| id.contains(marker))
    });

    UxContext {
        platform,
        content_type,
        form_fields,
        content_width_narrow: has_side_chrome || is_mobile,
        keep_context: has_persistent_nav,
        reversible: !destructive,
        device_has_touch: is_mobile,
        is_destructive: false,
        blocking: false,
        progress_known: None,
        has_fab_on_screen: false,
        empty_state: None,
    }
}
