// crates/meds-core/tests/pipeline.rs
// ============================================================================
// Module: Pipeline Tests
// Description: End-to-end orchestration, hashing, persistence, and auditing.
// ============================================================================
//! ## Overview
//! Runs the full pipeline over raw bytes and checks content-derived ids, the
//! in-memory store, size limits, and the one-audit-event-per-run contract.

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

use meds_core::DEFAULT_HASH_ALGORITHM;
use meds_core::InMemorySpecStore;
use meds_core::MemoryAuditSink;
use meds_core::PipelineError;
use meds_core::PipelineOutcome;
use meds_core::Platform;
use meds_core::PolicyPlatform;
use meds_core::SpecId;
use meds_core::SpecPipeline;
use meds_core::SpecStore;
use meds_core::hash_canonical_json;
use serde_json::json;

/// Builds a pipeline over the built-in rulebook with a memory audit sink.
fn pipeline_with_audit() -> (SpecPipeline, Arc<MemoryAuditSink>) {
    let audit = Arc::new(MemoryAuditSink::new());
    let pipeline = SpecPipeline::new(Arc::new(common::builtin_rulebook())).with_audit(audit.clone());
    (pipeline, audit)
}

#[test]
fn run_produces_content_addressed_output() {
    let (pipeline, _) = pipeline_with_audit();
    let raw = serde_json::to_vec(&common::admin_screen()).unwrap();
    let output = pipeline.run(&raw).unwrap();
    let expected = hash_canonical_json(DEFAULT_HASH_ALGORITHM, &output.spec).unwrap().to_spec_id();
    assert_eq!(output.spec_id, expected);
    assert!(output.spec_id.as_str().starts_with("meds_"));
    assert_eq!(output.evaluation.policy_meta.policy_id.as_str(), "ux-desktop-v1");
    assert!(output.spec.patterns.is_some());

    let serialized = serde_json::to_value(&output).unwrap();
    for key in ["specId", "spec", "context", "evaluation"] {
        assert!(serialized.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn identical_input_yields_identical_output() {
    let (pipeline, _) = pipeline_with_audit();
    let raw = serde_json::to_vec(&common::mobile_form()).unwrap();
    let first = pipeline.run(&raw).unwrap();
    let second = pipeline.run(&raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(serde_json::to_vec(&first).unwrap(), serde_json::to_vec(&second).unwrap());
}

#[test]
fn key_order_does_not_change_spec_id() {
    let (pipeline, _) = pipeline_with_audit();
    let first = pipeline.run(br#"{"composition":{"density":"compact","pageGapPx":16},"components":["Button"]}"#).unwrap();
    let second = pipeline.run(br#"{"components":["Button"],"composition":{"pageGapPx":16,"density":"compact"}}"#).unwrap();
    assert_eq!(first.spec_id, second.spec_id);
}

#[test]
fn process_matches_run_for_parsed_documents() {
    let (pipeline, _) = pipeline_with_audit();
    let document = common::admin_screen();
    let from_bytes = pipeline.run(&serde_json::to_vec(&document).unwrap()).unwrap();
    let from_value = pipeline.process(&document).unwrap();
    assert_eq!(from_bytes, from_value);
}

#[test]
fn rejected_input_returns_violations_and_audits() {
    let (pipeline, audit) = pipeline_with_audit();
    let err = pipeline.run(br#"{"components":[{"id":"hero","type":"Carousel"}]}"#).unwrap_err();
    assert!(matches!(err, PipelineError::Rejected(_)));
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].path, "/components/0/type");

    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, PipelineOutcome::Rejected);
    assert_eq!(events[0].violation_count, 1);
    assert_eq!(events[0].error_kind, Some("rejected"));
    assert_eq!(events[0].spec_id, None);
}

#[test]
fn invalid_json_is_an_error() {
    let (pipeline, audit) = pipeline_with_audit();
    let err = pipeline.run(b"{not json").unwrap_err();
    assert!(matches!(err, PipelineError::InvalidJson(_)));
    assert_eq!(audit.events()[0].outcome, PipelineOutcome::Error);
    assert_eq!(audit.events()[0].error_kind, Some("invalid_json"));
}

#[test]
fn oversized_input_is_rejected_before_parsing() {
    let (pipeline, audit) = pipeline_with_audit();
    let pipeline = pipeline.with_max_input_bytes(16);
    let err = pipeline.run(br#"{"components":["Button","Card"]}"#).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::InputTooLarge {
            max_bytes: 16,
            ..
        }
    ));
    assert_eq!(audit.events()[0].error_kind, Some("input_too_large"));
}

#[test]
fn successful_run_records_one_audit_event() {
    let (pipeline, audit) = pipeline_with_audit();
    let raw = serde_json::to_vec(&common::admin_screen()).unwrap();
    let output = pipeline.run(&raw).unwrap();
    let events = audit.events();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.event, "meds_pipeline");
    assert_eq!(event.outcome, PipelineOutcome::Ok);
    assert_eq!(event.spec_id.as_deref(), Some(output.spec_id.as_str()));
    assert_eq!(event.policy_id.as_deref(), Some("ux-desktop-v1"));
    assert_eq!(event.platform, Some(Platform::Desktop));
    assert_eq!(event.input_bytes, raw.len());
    assert_eq!(event.component_count, output.spec.components.len());
    assert_eq!(event.decision_count, output.evaluation.decisions.len());
    assert!(!event.persisted);

    let line = serde_json::to_value(event).unwrap();
    assert_eq!(line["outcome"], json!("ok"));
    assert!(line.get("components").is_none());
}

#[test]
fn store_receives_integrated_spec() {
    let store = Arc::new(InMemorySpecStore::new());
    let (pipeline, audit) = pipeline_with_audit();
    let pipeline = pipeline.with_store(store.clone());
    let output = pipeline.process(&common::mobile_form()).unwrap();
    assert_eq!(store.len().unwrap(), 1);
    let loaded = store.load(&output.spec_id).unwrap().unwrap();
    assert_eq!(loaded, output.spec);
    assert!(audit.events()[0].persisted);
    assert!(store.load(&SpecId::new("meds_missing")).unwrap().is_none());
}

#[test]
fn platform_override_selects_policy() {
    let (pipeline, _) = pipeline_with_audit();
    let pipeline = pipeline.with_platform_override(Some(PolicyPlatform::Mobile));
    let output = pipeline.process(&common::admin_screen()).unwrap();
    assert_eq!(output.evaluation.policy_meta.policy_id.as_str(), "ux-mobile-v1");
    assert_eq!(output.context.platform, Platform::Desktop);
}

#[test]
fn tablet_viewports_use_desktop_policy() {
    let (pipeline, _) = pipeline_with_audit();
    let output = pipeline.process(&json!({ "viewportProfile": { "platform": "tablet" } })).unwrap();
    assert_eq!(output.evaluation.policy_meta.platform, PolicyPlatform::Desktop);
    assert_eq!(output.spec.viewport_profile.platform, Platform::Tablet);
}
