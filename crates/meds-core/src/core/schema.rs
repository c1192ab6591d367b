// crates/meds-core/src/core/schema.rs
// ============================================================================
// Module: MEDS Spec Schema
// Description: JSON schema for validated and integrated design specs.
// Purpose: Publish the output contract consumed by persistence and tooling.
// Dependencies: crate::core::spec, serde_json
// ============================================================================

//! ## Overview
//! The published schema describes what the validator guarantees. It is not
//! used at runtime: validation is performed by typed construction in
//! `runtime::validate`. Tests check pipeline output against this schema so the
//! two cannot drift.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::core::spec::ColorToken;
use crate::core::spec::ComponentType;
use crate::core::spec::MAX_FONT_WEIGHT;
use crate::core::spec::MIN_FONT_WEIGHT;
use crate::core::spec::MIN_HIT_AREA_PX;
use crate::core::spec::MIN_TYPE_SCALE_LEN;
use crate::core::spec::MIN_TYPE_SCALE_PX;
use crate::core::spec::PIXEL_QUANTUM;
use crate::core::spec::SPEC_MODALITY;
use crate::core::spec::SPEC_VERSION;
use crate::core::spec::UNKNOWN_SENTINEL;

// ============================================================================
// SECTION: Patterns
// ============================================================================

/// Accepted hex color grammar.
pub const HEX_COLOR_PATTERN: &str = r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$";

/// Accepted easing grammar.
pub const EASING_PATTERN: &str = r"^(linear|ease-in|ease-out|ease-in-out|cubic-bezier\(\s*-?[0-9]*\.?[0-9]+\s*,\s*-?[0-9]*\.?[0-9]+\s*,\s*-?[0-9]*\.?[0-9]+\s*,\s*-?[0-9]*\.?[0-9]+\s*\))$";

/// Serialized UX action names.
const UX_ACTIONS: [&str; 17] = [
    "route",
    "modal",
    "drawer",
    "bottomSheet",
    "popover",
    "tooltip",
    "menu",
    "inlineEdit",
    "expand",
    "confirmDialog",
    "undoToast",
    "toast",
    "skeleton",
    "spinner",
    "progress",
    "enlargeTarget",
    "reduceMotion",
];

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Returns the JSON schema for a validated or integrated design spec.
#[must_use]
pub fn design_spec_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "meds://schemas/design-spec.schema.json",
        "title": "MEDS Design Specification",
        "description": "Validated machine-extracted design spec with optional UX integration blocks.",
        "type": "object",
        "required": ["version", "modality", "viewportProfile", "foundations", "components", "composition"],
        "properties": {
            "version": { "const": SPEC_VERSION },
            "modality": { "const": SPEC_MODALITY },
            "viewportProfile": viewport_schema(),
            "foundations": foundations_schema(),
            "components": {
                "type": "array",
                "items": component_schema()
            },
            "composition": composition_schema(),
            "uxRulebook": {},
            "uxSignals": {},
            "patterns": patterns_schema(),
            "accessibility": accessibility_schema(),
            "states": states_schema()
        },
        "additionalProperties": false
    })
}

/// Schema for a positive multiple of the pixel quantum.
fn quantized_px_schema() -> Value {
    json!({ "type": "integer", "minimum": PIXEL_QUANTUM, "multipleOf": PIXEL_QUANTUM })
}

/// Schema for a quantized pixel value or the unknown sentinel.
fn quantized_px_or_unknown_schema() -> Value {
    json!({ "oneOf": [quantized_px_schema(), { "const": UNKNOWN_SENTINEL }] })
}

/// Schema for a sorted, deduplicated list of quantized values.
fn quantized_list_schema() -> Value {
    json!({
        "type": "array",
        "items": { "type": "integer", "minimum": 0, "multipleOf": PIXEL_QUANTUM },
        "uniqueItems": true
    })
}

/// Schema for a confidence score.
fn confidence_schema() -> Value {
    json!({ "type": "number", "minimum": 0, "maximum": 1 })
}

/// Schema for the viewport profile.
fn viewport_schema() -> Value {
    let measured = json!({
        "oneOf": [{ "type": "integer", "minimum": 1 }, { "const": UNKNOWN_SENTINEL }]
    });
    json!({
        "type": "object",
        "required": ["platform", "widthPx", "heightPx", "confidence"],
        "properties": {
            "platform": { "enum": ["mobile", "tablet", "desktop"] },
            "widthPx": measured.clone(),
            "heightPx": measured,
            "confidence": confidence_schema()
        },
        "additionalProperties": false
    })
}

/// Schema for the foundations block.
fn foundations_schema() -> Value {
    let tokens: Vec<&str> = ColorToken::ALL.iter().map(|token| token.as_str()).collect();
    json!({
        "type": "object",
        "required": ["color", "typography", "spacing", "radius", "shadow", "motion", "grid", "a11y"],
        "properties": {
            "color": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["token", "hex", "usage"],
                    "properties": {
                        "token": { "enum": tokens },
                        "hex": { "type": "string", "pattern": HEX_COLOR_PATTERN },
                        "usage": { "type": "string" }
                    },
                    "additionalProperties": false
                }
            },
            "typography": {
                "type": "object",
                "required": ["primaryFamily", "familyCandidates", "scalePx", "weights"],
                "properties": {
                    "primaryFamily": { "type": "string", "minLength": 1 },
                    "familyCandidates": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["family", "confidence"],
                            "properties": {
                                "family": { "type": "string", "minLength": 1 },
                                "confidence": confidence_schema()
                            },
                            "additionalProperties": false
                        }
                    },
                    "scalePx": {
                        "type": "array",
                        "items": { "type": "integer", "minimum": MIN_TYPE_SCALE_PX },
                        "minItems": MIN_TYPE_SCALE_LEN,
                        "uniqueItems": true
                    },
                    "weights": {
                        "type": "array",
                        "items": { "type": "integer", "minimum": MIN_FONT_WEIGHT, "maximum": MAX_FONT_WEIGHT },
                        "minItems": 1
                    }
                },
                "additionalProperties": false
            },
            "spacing": {
                "type": "object",
                "required": ["basePx", "scalePx"],
                "properties": {
                    "basePx": quantized_px_or_unknown_schema(),
                    "scalePx": quantized_list_schema()
                },
                "additionalProperties": false
            },
            "radius": quantized_list_schema(),
            "shadow": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            },
            "motion": {
                "type": "object",
                "required": ["durationsMs", "easings"],
                "properties": {
                    "durationsMs": {
                        "type": "object",
                        "required": ["fast", "base", "slow"],
                        "properties": {
                            "fast": { "type": "integer", "minimum": 0 },
                            "base": { "type": "integer", "minimum": 0 },
                            "slow": { "type": "integer", "minimum": 0 }
                        },
                        "additionalProperties": false
                    },
                    "easings": {
                        "type": "array",
                        "items": { "type": "string", "pattern": EASING_PATTERN },
                        "minItems": 1
                    }
                },
                "additionalProperties": false
            },
            "grid": {
                "type": "object",
                "required": ["columns", "gutterPx", "marginPx", "maxWidthPx"],
                "properties": {
                    "columns": { "type": "integer", "minimum": 1 },
                    "gutterPx": quantized_px_or_unknown_schema(),
                    "marginPx": quantized_px_or_unknown_schema(),
                    "maxWidthPx": quantized_px_or_unknown_schema()
                },
                "additionalProperties": false
            },
            "a11y": {
                "type": "object",
                "required": ["minHitAreaPx", "focusRing", "contrast"],
                "properties": {
                    "minHitAreaPx": { "type": "integer", "minimum": MIN_HIT_AREA_PX, "multipleOf": PIXEL_QUANTUM },
                    "focusRing": {
                        "type": "object",
                        "required": ["widthPx", "style", "color"],
                        "properties": {
                            "widthPx": { "type": "integer", "minimum": 1 },
                            "style": { "type": "string", "minLength": 1 },
                            "color": { "type": "string", "pattern": HEX_COLOR_PATTERN }
                        },
                        "additionalProperties": false
                    },
                    "contrast": { "enum": ["AA", "AAA"] }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}

/// Schema for a component entry.
fn component_schema() -> Value {
    let types: Vec<&str> = ComponentType::ALL.iter().map(|kind| kind.as_str()).collect();
    json!({
        "type": "object",
        "required": ["id", "type", "variants", "states", "confidence"],
        "properties": {
            "id": { "type": "string", "minLength": 1 },
            "type": { "enum": types },
            "variants": { "type": "array", "items": { "type": "string" } },
            "states": { "type": "array", "items": { "type": "string" } },
            "style": { "type": "object" },
            "confidence": confidence_schema()
        },
        "additionalProperties": false
    })
}

/// Schema for the composition block.
fn composition_schema() -> Value {
    json!({
        "type": "object",
        "required": ["pageGapPx", "sectionGapPx", "cardGapPx", "density"],
        "properties": {
            "pageGapPx": quantized_px_or_unknown_schema(),
            "sectionGapPx": quantized_px_or_unknown_schema(),
            "cardGapPx": quantized_px_or_unknown_schema(),
            "density": { "enum": ["comfortable", "compact"] }
        },
        "additionalProperties": false
    })
}

/// Schema for an optional UX action reference.
fn optional_action_schema() -> Value {
    let mut accepted: Vec<Value> = UX_ACTIONS.iter().map(|action| Value::from(*action)).collect();
    accepted.push(Value::Null);
    json!({ "enum": accepted })
}

/// Schema for the integrated patterns block.
fn patterns_schema() -> Value {
    json!({
        "type": "object",
        "required": ["navigation", "feedback"],
        "properties": {
            "navigation": {
                "type": "object",
                "required": ["topology", "detailsAction"],
                "properties": {
                    "topology": { "enum": ["sidebar", "tabbed", "topNav", "drawer", "flat"] },
                    "detailsAction": optional_action_schema()
                },
                "additionalProperties": false
            },
            "feedback": {
                "type": "object",
                "required": ["timing", "action"],
                "properties": {
                    "timing": { "enum": ["transient", "progressive", "blocking", "inline"] },
                    "action": optional_action_schema()
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the integrated accessibility block.
fn accessibility_schema() -> Value {
    json!({
        "type": "object",
        "required": [
            "keyboardNavigation",
            "focusVisible",
            "contrast",
            "minTargetPx",
            "touchTargetsEnforced",
            "reducedMotion"
        ],
        "properties": {
            "keyboardNavigation": { "type": "boolean" },
            "focusVisible": { "type": "boolean" },
            "contrast": { "enum": ["AA", "AAA"] },
            "minTargetPx": { "type": "integer", "minimum": MIN_HIT_AREA_PX },
            "touchTargetsEnforced": { "type": "boolean" },
            "reducedMotion": { "type": "boolean" }
        },
        "additionalProperties": false
    })
}

/// Schema for the integrated states block.
fn states_schema() -> Value {
    json!({
        "type": "object",
        "required": ["loading", "empty", "error"],
        "properties": {
            "loading": { "enum": ["skeleton", "progress", "spinner", "none"] },
            "empty": { "enum": ["illustrated", "message"] },
            "error": { "enum": ["toast", "modal", "inline"] }
        },
        "additionalProperties": false
    })
}
