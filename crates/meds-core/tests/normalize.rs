// crates/meds-core/tests/normalize.rs
// ============================================================================
// Module: Normalizer Tests
// Description: Shape repair, quantization, and remapping of raw AI output.
// ============================================================================
//! ## Overview
//! Exercises the normalizer against realistic raw documents and the documented
//! repair rules (pixel quantization, token remaps, easing filtering).

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use meds_core::normalize;
use meds_core::runtime::quantize8;
use meds_core::validate_and_fill;
use serde_json::json;

#[test]
fn null_shadow_becomes_none_preset() {
    let normalized = normalize(&json!({ "foundations": { "shadow": null } }));
    assert_eq!(normalized["foundations"]["shadow"], json!({ "none": "none" }));
}

#[test]
fn spacing_scale_is_quantized_deduplicated_and_sorted() {
    let normalized = normalize(&json!({ "foundations": { "spacing": { "scalePx": [10, 10, 22] } } }));
    assert_eq!(normalized["foundations"]["spacing"]["scalePx"], json!([8, 24]));
}

#[test]
fn quantize_rounds_to_nearest_multiple_of_eight() {
    assert!((quantize8(10.0) - 8.0).abs() < f64::EPSILON);
    assert!((quantize8(22.0) - 24.0).abs() < f64::EPSILON);
    assert!((quantize8(12.0) - 16.0).abs() < f64::EPSILON);
    assert!(quantize8(3.0).abs() < f64::EPSILON);
}

#[test]
fn empty_document_gets_header_and_default_sections() {
    let normalized = normalize(&json!({}));
    assert_eq!(normalized["version"], json!("1.0"));
    assert_eq!(normalized["modality"], json!("screenshot"));
    assert_eq!(normalized["viewportProfile"]["platform"], json!("desktop"));
    assert_eq!(normalized["viewportProfile"]["widthPx"], json!("unknown"));
    assert_eq!(normalized["components"], json!([]));
    assert_eq!(normalized["composition"]["density"], json!("comfortable"));
    assert_eq!(normalized["foundations"]["spacing"]["basePx"], json!(8));
}

#[test]
fn non_object_input_is_treated_as_empty_document() {
    assert_eq!(normalize(&json!([1, 2, 3])), normalize(&json!({})));
}

#[test]
fn viewport_is_lowercased_rounded_and_clamped() {
    let normalized = normalize(&common::admin_screen());
    let viewport = &normalized["viewportProfile"];
    assert_eq!(viewport["platform"], json!("desktop"));
    assert_eq!(viewport["widthPx"], json!(1440));
    assert_eq!(viewport["heightPx"], json!(900));

    let clamped = normalize(&json!({ "viewportProfile": { "platform": "mobile", "widthPx": -4, "confidence": 3 } }));
    assert_eq!(clamped["viewportProfile"]["widthPx"], json!("unknown"));
    assert_eq!(clamped["viewportProfile"]["confidence"], json!(1));
}

#[test]
fn color_tokens_are_remapped_and_hex_repaired() {
    let normalized = normalize(&common::admin_screen());
    let colors = &normalized["foundations"]["color"];
    assert_eq!(colors[0], json!({ "token": "primary", "hex": "#2563EB", "usage": "buttons" }));
    assert_eq!(colors[1], json!({ "token": "surface", "hex": "#FFFFFF", "usage": "" }));
    assert_eq!(colors[2]["token"], json!("text"));
}

#[test]
fn unknown_color_tokens_pass_through_for_validation() {
    let normalized = normalize(&json!({
        "foundations": { "color": [{ "token": "sparkle", "hex": "#fff" }] }
    }));
    assert_eq!(normalized["foundations"]["color"][0]["token"], json!("sparkle"));
}

#[test]
fn typography_candidates_scale_and_weights_are_repaired() {
    let normalized = normalize(&common::admin_screen());
    let typography = &normalized["foundations"]["typography"];
    assert_eq!(typography["primaryFamily"], json!("Inter"));
    assert_eq!(
        typography["familyCandidates"],
        json!([{ "family": "Inter", "confidence": 0.8 }, { "family": "Roboto", "confidence": 1 }])
    );
    assert_eq!(typography["scalePx"], json!([12, 14, 20, 32]));
    assert_eq!(typography["weights"], json!([400, 600]));
}

#[test]
fn short_type_scale_and_empty_weights_fall_back() {
    let normalized = normalize(&json!({
        "foundations": { "typography": { "scalePx": [4, 16], "weights": [100, "bold"] } }
    }));
    let typography = &normalized["foundations"]["typography"];
    assert_eq!(typography["scalePx"], json!([12, 16, 24]));
    assert_eq!(typography["weights"], json!([400]));
}

#[test]
fn primary_family_falls_back_to_first_candidate() {
    let normalized = normalize(&json!({
        "foundations": { "typography": { "familyCandidates": ["  Manrope ", "Inter"] } }
    }));
    assert_eq!(normalized["foundations"]["typography"]["primaryFamily"], json!("Manrope"));
}

#[test]
fn named_radii_are_flattened_and_quantized() {
    let normalized = normalize(&common::admin_screen());
    assert_eq!(normalized["foundations"]["radius"], json!([0, 8]));
    let single = normalize(&json!({ "foundations": { "radius": 12 } }));
    assert_eq!(single["foundations"]["radius"], json!([16]));
}

#[test]
fn scalar_pixels_are_floored_at_one_quantum() {
    let normalized = normalize(&json!({ "foundations": { "spacing": { "basePx": 2 } } }));
    assert_eq!(normalized["foundations"]["spacing"]["basePx"], json!(8));
}

#[test]
fn non_string_shadows_are_dropped() {
    let normalized = normalize(&common::admin_screen());
    assert_eq!(
        normalized["foundations"]["shadow"],
        json!({ "card": "0 1px 2px rgba(0,0,0,0.1)" })
    );
}

#[test]
fn mismatched_header_literals_are_overwritten() {
    let normalized = normalize(&json!({ "version": "1", "modality": "image" }));
    assert_eq!(normalized["version"], json!("1.0"));
    assert_eq!(normalized["modality"], json!("screenshot"));
    assert!(validate_and_fill(&normalized).is_ok());
}

#[test]
fn easings_are_filtered_deduplicated_and_defaulted() {
    let normalized = normalize(&common::admin_screen());
    let motion = &normalized["foundations"]["motion"];
    assert_eq!(motion["easings"], json!(["ease-out"]));
    assert_eq!(motion["durationsMs"], json!({ "fast": 100, "base": 200, "slow": 320 }));

    let single = normalize(&json!({ "foundations": { "motion": { "easings": "cubic-bezier(0.4, 0, 0.2, 1)" } } }));
    assert_eq!(single["foundations"]["motion"]["easings"], json!(["cubic-bezier(0.4, 0, 0.2, 1)"]));

    let invalid = normalize(&json!({ "foundations": { "motion": { "easings": ["springy"] } } }));
    assert_eq!(invalid["foundations"]["motion"]["easings"], json!(["ease-in-out"]));
}

#[test]
fn grid_and_a11y_are_repaired() {
    let normalized = normalize(&common::admin_screen());
    let grid = &normalized["foundations"]["grid"];
    assert_eq!(grid["gutterPx"], json!(24));
    assert_eq!(grid["marginPx"], json!(32));
    assert_eq!(grid["maxWidthPx"], json!("unknown"));
    let a11y = &normalized["foundations"]["a11y"];
    assert_eq!(a11y["minHitAreaPx"], json!(40));
    assert_eq!(a11y["contrast"], json!("AAA"));
    assert_eq!(a11y["focusRing"], json!({ "widthPx": 2, "style": "solid", "color": "#2563EB" }));
}

#[test]
fn component_types_and_ids_are_repaired() {
    let normalized = normalize(&common::admin_screen());
    let components = normalized["components"].as_array().unwrap();
    let types: Vec<&str> = components.iter().map(|component| component["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["AppBar", "Sidebar", "Table", "Button", "Button"]);
    assert_eq!(components[3]["id"], json!("component-3"));
    assert_eq!(components[3]["confidence"], json!(1));
    assert_eq!(components[2]["variants"], json!(["striped"]));
}

#[test]
fn string_components_and_duplicate_ids_are_repaired() {
    let normalized = normalize(&json!({
        "components": ["navbar", { "id": "cta", "type": "btn" }, { "id": "cta", "type": "Button" }, 7]
    }));
    let components = normalized["components"].as_array().unwrap();
    assert_eq!(components.len(), 3);
    assert_eq!(components[0]["type"], json!("NavBar"));
    assert_eq!(components[0]["id"], json!("component-0"));
    assert_eq!(components[1]["id"], json!("cta"));
    assert_eq!(components[2]["id"], json!("cta-2"));
}

#[test]
fn composition_gaps_are_quantized() {
    let normalized = normalize(&common::admin_screen());
    assert_eq!(
        normalized["composition"],
        json!({ "pageGapPx": 24, "sectionGapPx": 32, "cardGapPx": 16, "density": "compact" })
    );
}

#[test]
fn null_legacy_passthrough_fields_are_removed() {
    let normalized = normalize(&json!({ "uxRulebook": null, "uxSignals": { "clicks": 3 } }));
    assert!(normalized.get("uxRulebook").is_none());
    assert_eq!(normalized["uxSignals"], json!({ "clicks": 3 }));
}

#[test]
fn normalize_is_idempotent_on_fixtures() {
    for raw in [common::admin_screen(), common::mobile_form(), json!({})] {
        let once = normalize(&raw);
        assert_eq!(normalize(&once), once);
    }
}
