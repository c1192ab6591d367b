// crates/meds-core/tests/validate.rs
// ============================================================================
// Module: Validator Tests
// Description: Schema enforcement, default filling, and violation reporting.
// ============================================================================
//! ## Overview
//! Validates that normalized documents become typed specs with defaults filled
//! and that every violated constraint is reported with a JSON pointer path.

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

use meds_core::ColorToken;
use meds_core::ComponentType;
use meds_core::ContrastClass;
use meds_core::Density;
use meds_core::PixelValue;
use meds_core::Platform;
use meds_core::SpecViolation;
use meds_core::normalize;
use meds_core::validate_and_fill;
use serde_json::Value;
use serde_json::json;

/// Returns the violation paths for a document that must fail validation.
fn violation_paths(document: &Value) -> Vec<String> {
    let violations = validate_and_fill(document).expect_err("document should be rejected");
    violations.into_iter().map(|violation| violation.path).collect()
}

#[test]
fn empty_document_validates_with_defaults() {
    let spec = validate_and_fill(&normalize(&json!({}))).unwrap();
    assert_eq!(spec.version, "1.0");
    assert_eq!(spec.modality, "screenshot");
    assert_eq!(spec.viewport_profile.platform, Platform::Desktop);
    assert_eq!(spec.viewport_profile.width_px, PixelValue::Unknown);
    assert_eq!(spec.foundations.color.len(), 5);
    assert_eq!(spec.foundations.typography.scale_px, vec![12, 16, 24]);
    assert_eq!(spec.foundations.radius, vec![8, 16]);
    assert_eq!(spec.foundations.shadow.get("none").map(String::as_str), Some("none"));
    assert_eq!(spec.foundations.a11y.min_hit_area_px, 40);
    assert!(spec.components.is_empty());
    assert_eq!(spec.composition.density, Density::Comfortable);
    assert!(spec.patterns.is_none());
}

#[test]
fn admin_screen_validates_into_typed_spec() {
    let spec = validate_and_fill(&normalize(&common::admin_screen())).unwrap();
    assert_eq!(spec.viewport_profile.width_px, PixelValue::Px(1440));
    assert!(spec.has_color(ColorToken::Primary));
    assert!(spec.has_color(ColorToken::Surface));
    assert_eq!(spec.foundations.spacing.base_px, PixelValue::Px(8));
    assert_eq!(spec.foundations.spacing.scale_px, vec![8, 24, 32]);
    assert_eq!(spec.foundations.a11y.contrast, ContrastClass::Aaa);
    assert_eq!(spec.components.len(), 5);
    assert!(spec.has_component(ComponentType::Table));
    assert_eq!(spec.composition.density, Density::Compact);
    assert_eq!(spec.composition.section_gap_px, PixelValue::Px(32));
}

#[test]
fn unknown_component_type_is_reported_with_path() {
    let document = normalize(&json!({ "components": [{ "id": "hero", "type": "Carousel" }] }));
    assert_eq!(violation_paths(&document), vec!["/components/0/type".to_string()]);
}

#[test]
fn every_violation_is_collected() {
    let document = normalize(&json!({
        "viewportProfile": { "platform": "watch" },
        "foundations": { "color": [{ "token": "sparkle", "hex": "blue" }] },
        "components": [{ "id": "x", "type": "Carousel" }]
    }));
    let paths = violation_paths(&document);
    assert_eq!(
        paths,
        vec![
            "/viewportProfile/platform".to_string(),
            "/foundations/color/0/token".to_string(),
            "/foundations/color/0/hex".to_string(),
            "/components/0/type".to_string(),
        ]
    );
}

#[test]
fn violation_display_includes_path_and_message() {
    let violation = SpecViolation::new("/modality", "must equal \"screenshot\"");
    assert_eq!(violation.to_string(), "/modality: must equal \"screenshot\"");
}

#[test]
fn wrong_literals_are_rejected() {
    let mut document = normalize(&json!({}));
    document["version"] = json!("2.0");
    document["modality"] = json!("video");
    assert_eq!(violation_paths(&document), vec!["/version".to_string(), "/modality".to_string()]);
}

#[test]
fn unquantized_pixels_are_rejected_when_normalization_is_skipped() {
    let mut document = normalize(&json!({}));
    document["foundations"]["spacing"]["basePx"] = json!(10);
    document["foundations"]["radius"] = json!([16, 8]);
    document["composition"]["pageGapPx"] = json!("wide");
    let paths = violation_paths(&document);
    assert!(paths.contains(&"/foundations/spacing/basePx".to_string()));
    assert!(paths.contains(&"/foundations/radius".to_string()));
    assert!(paths.contains(&"/composition/pageGapPx".to_string()));
}

#[test]
fn unknown_spacing_base_is_accepted() {
    let raw = json!({ "foundations": { "spacing": { "basePx": "unknown", "scalePx": [8, 16] } } });
    let spec = validate_and_fill(&normalize(&raw)).unwrap();
    assert_eq!(spec.foundations.spacing.base_px, PixelValue::Unknown);
    assert_eq!(spec.foundations.spacing.scale_px, vec![8, 16]);
}

#[test]
fn unknown_grid_gaps_are_accepted() {
    let raw = json!({ "foundations": { "grid": { "gutterPx": "unknown", "marginPx": "unknown" } } });
    let spec = validate_and_fill(&normalize(&raw)).unwrap();
    assert_eq!(spec.foundations.grid.gutter_px, PixelValue::Unknown);
    assert_eq!(spec.foundations.grid.margin_px, PixelValue::Unknown);
    assert_eq!(spec.foundations.grid.columns, 12);
}

#[test]
fn non_sentinel_strings_in_grid_are_rejected() {
    let raw = json!({ "foundations": { "grid": { "gutterPx": "wide" } } });
    assert_eq!(violation_paths(&normalize(&raw)), vec!["/foundations/grid/gutterPx".to_string()]);
}

#[test]
fn small_hit_area_is_rejected() {
    let mut document = normalize(&json!({}));
    document["foundations"]["a11y"]["minHitAreaPx"] = json!(32);
    assert_eq!(violation_paths(&document), vec!["/foundations/a11y/minHitAreaPx".to_string()]);
}

#[test]
fn missing_required_sections_are_reported() {
    let paths = violation_paths(&json!({ "version": "1.0", "modality": "screenshot" }));
    assert_eq!(
        paths,
        vec![
            "/viewportProfile".to_string(),
            "/foundations".to_string(),
            "/components".to_string(),
            "/composition".to_string(),
        ]
    );
}

#[test]
fn duplicate_component_ids_are_rejected() {
    let mut document = normalize(&json!({ "components": [{ "id": "a", "type": "Button" }] }));
    document["components"] = json!([
        { "id": "a", "type": "Button", "confidence": 0.5 },
        { "id": "a", "type": "Card", "confidence": 0.5 }
    ]);
    assert_eq!(violation_paths(&document), vec!["/components/1/id".to_string()]);
}

#[test]
fn unknown_fields_are_dropped() {
    let mut raw = common::admin_screen();
    raw["debugInfo"] = json!({ "model": "vision-x" });
    raw["foundations"]["elevation"] = json!([1, 2]);
    let spec = validate_and_fill(&normalize(&raw)).unwrap();
    let serialized = serde_json::to_value(&spec).unwrap();
    assert!(serialized.get("debugInfo").is_none());
    assert!(serialized["foundations"].get("elevation").is_none());
}

#[test]
fn optional_foundation_sections_default_when_absent() {
    let mut document = normalize(&json!({}));
    let foundations = document["foundations"].as_object_mut().unwrap();
    for key in ["radius", "shadow", "motion", "grid", "a11y"] {
        foundations.remove(key);
    }
    let spec = validate_and_fill(&document).unwrap();
    assert_eq!(spec.foundations.motion.easings, vec!["ease-in-out".to_string()]);
    assert_eq!(spec.foundations.grid.columns, 12);
    assert_eq!(spec.foundations.grid.max_width_px, PixelValue::Unknown);
}
