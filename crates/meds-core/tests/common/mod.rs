// crates/meds-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Fixtures
// Description: Raw AI documents, contexts, and rulebooks reused across tests.
// ============================================================================
//! ## Overview
//! Fixture builders shared by the `meds-core` integration tests.

#![allow(dead_code, reason = "Each test binary uses a different subset of fixtures.")]

use meds_core::ContentType;
use meds_core::Platform;
use meds_core::Rulebook;
use meds_core::UxContext;
use serde_json::Value;
use serde_json::json;

/// Returns a realistic raw AI document for a desktop admin screen.
pub fn admin_screen() -> Value {
    json!({
        "viewportProfile": { "platform": "Desktop", "widthPx": 1439.6, "heightPx": 900, "confidence": 0.92 },
        "foundations": {
            "color": [
                { "token": "brand", "hex": "2563EB", "usage": "buttons" },
                { "token": "background", "hex": "#FFFFFF" },
                { "token": "foreground", "hex": "#111827", "usage": "body text" }
            ],
            "typography": {
                "primaryFamily": "Inter",
                "familyCandidates": ["Inter", { "family": "Roboto", "confidence": 1.4 }],
                "scalePx": [12, 14.2, 14, 20, 32],
                "weights": ["400", 600, 950]
            },
            "spacing": { "basePx": 7, "scalePx": [4, 10, 10, 22, 33] },
            "radius": { "sm": 3, "md": 9 },
            "shadow": { "card": "0 1px 2px rgba(0,0,0,0.1)", "broken": 4 },
            "motion": { "durationsMs": { "fast": 99.6 }, "easings": ["ease-out", "bounce", "ease-out"] },
            "grid": { "columns": 12, "gutterPx": 20, "marginPx": 30 },
            "a11y": { "minHitAreaPx": 32, "contrast": "aaa" }
        },
        "components": [
            { "id": "top", "type": "header" },
            { "id": "nav", "type": "sidenav" },
            { "id": "users", "type": "DataTable", "variants": ["striped", 3] },
            { "type": "button", "confidence": 1.7 },
            { "id": "delete-user", "type": "Button" }
        ],
        "composition": { "pageGapPx": 20, "sectionGapPx": 28, "cardGapPx": 14, "density": "compact" }
    })
}

/// Returns a raw document for a mobile form screen.
pub fn mobile_form() -> Value {
    json!({
        "viewportProfile": { "platform": "mobile", "widthPx": 390, "heightPx": 844 },
        "components": [
            "AppBar",
            { "id": "name", "type": "input" },
            { "id": "email", "type": "TextField" },
            { "id": "role", "type": "dropdown" },
            { "id": "bio", "type": "TextArea" },
            { "id": "terms", "type": "checkbox" },
            { "id": "plan", "type": "radio" },
            { "id": "save", "type": "Button" }
        ],
        "composition": { "density": "compact" }
    })
}

/// Loads the built-in rulebook.
pub fn builtin_rulebook() -> Rulebook {
    Rulebook::builtin().expect("builtin rulebook")
}

/// Returns a neutral desktop context.
pub fn desktop_context() -> UxContext {
    UxContext {
        platform: Platform::Desktop,
        content_type: ContentType::Single,
        form_fields: 0,
        content_width_narrow: false,
        keep_context: false,
        reversible: true,
        device_has_touch: false,
        is_destructive: false,
        blocking: false,
        progress_known: None,
        has_fab_on_screen: false,
        empty_state: None,
    }
}

/// Parses a rulebook document from inline JSON.
pub fn rulebook_from(value: &Value) -> Rulebook {
    let bytes = serde_json::to_vec(value).expect("serialize rulebook");
    Rulebook::from_json_slice(&bytes).expect("valid rulebook")
}
