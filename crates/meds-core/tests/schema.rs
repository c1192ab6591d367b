// crates/meds-core/tests/schema.rs
// ============================================================================
// Module: Spec Schema Conformance Tests
// Description: Validates pipeline output against the published JSON schema.
// ============================================================================
//! ## Overview
//! Compiles the design spec schema with a Draft 2020-12 validator and checks
//! that validated and integrated specs conform while malformed ones do not.

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

use std::sync::Arc;

use jsonschema::Draft;
use jsonschema::Validator;
use meds_core::SpecPipeline;
use meds_core::design_spec_schema;
use meds_core::normalize;
use meds_core::validate_and_fill;
use serde_json::Value;
use serde_json::json;

/// Compiles the published spec schema.
fn compile() -> Validator {
    jsonschema::options().with_draft(Draft::Draft202012).build(&design_spec_schema()).unwrap()
}

/// Returns schema error messages for an instance.
fn schema_errors(validator: &Validator, instance: &Value) -> Vec<String> {
    validator.iter_errors(instance).map(|err| err.to_string()).collect()
}

#[test]
fn schema_declares_draft_and_id() {
    let schema = design_spec_schema();
    assert_eq!(schema["$schema"], json!("https://json-schema.org/draft/2020-12/schema"));
    assert_eq!(schema["$id"], json!("meds://schemas/design-spec.schema.json"));
}

#[test]
fn validated_specs_conform() {
    let validator = compile();
    for raw in [json!({}), common::admin_screen(), common::mobile_form()] {
        let spec = validate_and_fill(&normalize(&raw)).unwrap();
        let instance = serde_json::to_value(&spec).unwrap();
        let errors = schema_errors(&validator, &instance);
        assert!(errors.is_empty(), "{errors:?}");
    }
}

#[test]
fn integrated_specs_conform() {
    let validator = compile();
    let pipeline = SpecPipeline::new(Arc::new(common::builtin_rulebook()));
    for raw in [json!({}), common::admin_screen(), common::mobile_form()] {
        let output = pipeline.process(&raw).unwrap();
        let instance = serde_json::to_value(&output.spec).unwrap();
        let errors = schema_errors(&validator, &instance);
        assert!(errors.is_empty(), "{errors:?}");
    }
}

#[test]
fn schema_rejects_unquantized_and_unknown_values() {
    let validator = compile();
    let spec = validate_and_fill(&normalize(&common::admin_screen())).unwrap();
    let valid = serde_json::to_value(&spec).unwrap();

    let mut unquantized = valid.clone();
    unquantized["foundations"]["spacing"]["basePx"] = json!(10);
    assert!(!validator.is_valid(&unquantized));

    let mut unknown_type = valid.clone();
    unknown_type["components"][0]["type"] = json!("Carousel");
    assert!(!validator.is_valid(&unknown_type));

    let mut extra_field = valid;
    extra_field["debugInfo"] = json!(true);
    assert!(!validator.is_valid(&extra_field));
}
