// crates/meds-core/tests/evaluator.rs
// ============================================================================
// Module: Rule Evaluator Tests
// Description: Guarded, first-match-wins rule evaluation.
// ============================================================================
//! ## Overview
//! Covers guard comparators, first-match ordering, base fallbacks, metadata
//! merging, decision completeness, and the missing-policy sentinel.

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

use meds_core::ContentType;
use meds_core::PolicyPlatform;
use meds_core::Priority;
use meds_core::RuleFamily;
use meds_core::Rulebook;
use meds_core::UxAction;
use meds_core::UxContext;
use meds_core::evaluate;
use serde_json::Value;
use serde_json::json;

/// Builds a one-rule desktop rulebook guarded by `when`.
fn single_guard_rulebook(when: &Value) -> Rulebook {
    common::rulebook_from(&json!({
        "version": "test",
        "policies": [{
            "policyId": "desktop-test",
            "platform": "desktop",
            "rules": [{
                "id": "edit-form",
                "family": "Edit",
                "event": "click",
                "action": "inlineEdit",
                "guards": [{ "when": when, "then": { "action": "route", "priority": "high" } }]
            }]
        }]
    }))
}

/// Evaluates a single-guard rulebook and reports whether the guard matched.
fn guard_matches(when: &Value, context: &UxContext) -> bool {
    let evaluation = evaluate(&single_guard_rulebook(when), context, PolicyPlatform::Desktop);
    evaluation.decisions[0].matched_guard_index.is_some()
}

#[test]
fn exclusive_greater_than_comparator() {
    let mut context = common::desktop_context();
    context.form_fields = 6;
    assert!(guard_matches(&json!({ "formFields": ">5" }), &context));
    context.form_fields = 5;
    assert!(!guard_matches(&json!({ "formFields": ">5" }), &context));
}

#[test]
fn inclusive_greater_than_comparator() {
    let mut context = common::desktop_context();
    context.form_fields = 5;
    assert!(guard_matches(&json!({ "formFields": ">=5" }), &context));
    context.form_fields = 4;
    assert!(!guard_matches(&json!({ "formFields": ">=5" }), &context));
}

#[test]
fn equality_and_membership_comparators() {
    let mut context = common::desktop_context();
    context.content_type = ContentType::List;
    assert!(guard_matches(&json!({ "contentType": "list" }), &context));
    assert!(guard_matches(&json!({ "contentType": ["table", "list"] }), &context));
    assert!(!guard_matches(&json!({ "contentType": ["table"] }), &context));
    assert!(guard_matches(&json!({ "keepContext": false }), &context));
    assert!(guard_matches(&json!({ "formFields": 0 }), &context));
}

#[test]
fn all_predicates_must_match() {
    let mut context = common::desktop_context();
    context.content_type = ContentType::Table;
    assert!(!guard_matches(&json!({ "contentType": "table", "keepContext": true }), &context));
    context.keep_context = true;
    assert!(guard_matches(&json!({ "contentType": "table", "keepContext": true }), &context));
}

#[test]
fn unset_context_keys_never_match() {
    let context = common::desktop_context();
    assert!(!guard_matches(&json!({ "progressKnown": true }), &context));
    assert!(!guard_matches(&json!({ "progressKnown": false }), &context));
}

#[test]
fn numeric_comparator_against_non_numeric_value_fails_closed() {
    let context = common::desktop_context();
    assert!(!guard_matches(&json!({ "contentType": ">1" }), &context));
    assert!(!guard_matches(&json!({ "keepContext": ">=0" }), &context));
}

#[test]
fn first_matching_guard_wins() {
    let rulebook = common::rulebook_from(&json!({
        "version": "test",
        "policies": [{
            "policyId": "desktop-test",
            "platform": "desktop",
            "rules": [{
                "id": "details",
                "family": "Details",
                "event": "click",
                "action": "route",
                "guards": [
                    { "when": { "reversible": true }, "then": { "action": "modal" } },
                    { "when": { "reversible": true }, "then": { "action": "drawer" } }
                ]
            }]
        }]
    }));
    let evaluation = evaluate(&rulebook, &common::desktop_context(), PolicyPlatform::Desktop);
    let decision = &evaluation.decisions[0];
    assert_eq!(decision.matched_guard_index, Some(0));
    assert_eq!(decision.action, UxAction::Modal);
}

#[test]
fn later_guard_applies_when_earlier_guard_fails() {
    let rulebook = common::rulebook_from(&json!({
        "version": "test",
        "policies": [{
            "policyId": "desktop-test",
            "platform": "desktop",
            "rules": [{
                "id": "details",
                "family": "Details",
                "event": "click",
                "action": "route",
                "guards": [
                    { "when": { "deviceHasTouch": true }, "then": { "action": "bottomSheet" } },
                    { "when": { "deviceHasTouch": false }, "then": { "action": "drawer" } }
                ]
            }]
        }]
    }));
    let evaluation = evaluate(&rulebook, &common::desktop_context(), PolicyPlatform::Desktop);
    assert_eq!(evaluation.decisions[0].matched_guard_index, Some(1));
    assert_eq!(evaluation.decisions[0].action, UxAction::Drawer);
}

#[test]
fn base_values_apply_without_a_match() {
    let rulebook = single_guard_rulebook(&json!({ "formFields": ">5" }));
    let evaluation = evaluate(&rulebook, &common::desktop_context(), PolicyPlatform::Desktop);
    let decision = &evaluation.decisions[0];
    assert_eq!(decision.matched_guard_index, None);
    assert_eq!(decision.action, UxAction::InlineEdit);
    assert_eq!(decision.priority, Priority::Medium);
    assert!((decision.confidence - 0.7).abs() < f64::EPSILON);
    let serialized = serde_json::to_value(decision).unwrap();
    assert_eq!(serialized["matchedGuardIndex"], json!(-1));
}

#[test]
fn policy_defaults_fill_missing_priority_and_confidence() {
    let rulebook = common::rulebook_from(&json!({
        "version": "test",
        "policies": [{
            "policyId": "mobile-test",
            "platform": "mobile",
            "defaults": { "priority": "low", "confidence": 0.4 },
            "rules": [{ "id": "motion", "family": "Motion", "event": "hover", "action": "reduceMotion" }]
        }]
    }));
    let evaluation = evaluate(&rulebook, &common::desktop_context(), PolicyPlatform::Mobile);
    assert_eq!(evaluation.decisions[0].priority, Priority::Low);
    assert!((evaluation.decisions[0].confidence - 0.4).abs() < f64::EPSILON);
}

#[test]
fn guard_meta_is_shallow_merged_with_style_and_placement() {
    let rulebook = common::rulebook_from(&json!({
        "version": "test",
        "policies": [{
            "policyId": "desktop-test",
            "platform": "desktop",
            "rules": [{
                "id": "menu",
                "family": "Menus",
                "event": "click",
                "action": "menu",
                "meta": { "reason": "base", "items": 4 },
                "guards": [{
                    "when": { "platform": "desktop" },
                    "then": {
                        "meta": { "reason": "guard" },
                        "style": { "elevation": 2 },
                        "placement": "bottom-end"
                    }
                }]
            }]
        }]
    }));
    let evaluation = evaluate(&rulebook, &common::desktop_context(), PolicyPlatform::Desktop);
    let meta = &evaluation.decisions[0].meta;
    assert_eq!(meta.get("reason"), Some(&json!("guard")));
    assert_eq!(meta.get("items"), Some(&json!(4)));
    assert_eq!(meta.get("style"), Some(&json!({ "elevation": 2 })));
    assert_eq!(meta.get("placement"), Some(&json!("bottom-end")));
}

#[test]
fn missing_policy_returns_sentinel() {
    let rulebook = single_guard_rulebook(&json!({ "formFields": ">5" }));
    let evaluation = evaluate(&rulebook, &common::desktop_context(), PolicyPlatform::Mobile);
    assert!(evaluation.decisions.is_empty());
    assert!(evaluation.is_unscoped());
    assert_eq!(evaluation.policy_meta.policy_id.as_str(), "none");
    assert_eq!(evaluation.policy_meta.rule_count, 0);
}

#[test]
fn builtin_rulebook_yields_one_decision_per_rule() {
    let rulebook = common::builtin_rulebook();
    let context = common::desktop_context();
    for platform in [PolicyPlatform::Desktop, PolicyPlatform::Mobile] {
        let evaluation = evaluate(&rulebook, &context, platform);
        let policy = rulebook.policy_for(platform).unwrap();
        assert_eq!(evaluation.decisions.len(), policy.rules.len());
        assert_eq!(evaluation.policy_meta.rule_count, policy.rules.len());
        let ids: Vec<&str> = evaluation.decisions.iter().map(|decision| decision.rule_id.as_str()).collect();
        let expected: Vec<&str> = policy.rules.iter().map(|rule| rule.id.as_str()).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn builtin_desktop_policy_on_dense_table_screen() {
    let rulebook = common::builtin_rulebook();
    let mut context = common::desktop_context();
    context.content_type = ContentType::Table;
    context.keep_context = true;
    context.content_width_narrow = true;
    let evaluation = evaluate(&rulebook, &context, PolicyPlatform::Desktop);
    let by_id = |id: &str| evaluation.decisions.iter().find(|decision| decision.rule_id.as_str() == id).unwrap();
    assert_eq!(by_id("nav-primary").action, UxAction::Route);
    assert_eq!(by_id("details-open").action, UxAction::Drawer);
    assert_eq!(by_id("details-open").matched_guard_index, Some(0));
    assert_eq!(by_id("row-actions").action, UxAction::Popover);
    assert_eq!(by_id("content-loading").action, UxAction::Skeleton);
    assert_eq!(by_id("focus-target").family, RuleFamily::Target);
    assert_eq!(evaluation.policy_meta.rulebook_version, rulebook.version);
    assert_eq!(evaluation.policy_meta.order, "first-match");
}

#[test]
fn evaluation_is_byte_for_byte_deterministic() {
    let rulebook = common::builtin_rulebook();
    let mut context = common::desktop_context();
    context.form_fields = 7;
    let first = serde_json::to_vec(&evaluate(&rulebook, &context, PolicyPlatform::Desktop)).unwrap();
    for _ in 0 .. 16 {
        let again = serde_json::to_vec(&evaluate(&rulebook, &context, PolicyPlatform::Desktop)).unwrap();
        assert_eq!(first, again);
    }
}
