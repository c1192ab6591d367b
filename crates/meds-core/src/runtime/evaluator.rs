// crates/meds-core/src/runtime/evaluator.rs
// ============================================================================
// Module: MEDS Rule Evaluator
// Description: Guarded, first-match-wins evaluation of rulebook policies.
// Purpose: Produce exactly one UX decision per rule for a context.
// Dependencies: crate::core, crate::runtime::comparator, serde_json
// ============================================================================

//! ## Overview
//! For the policy scoped to the requested platform, each rule is evaluated
//! independently: its guards are scanned in declared order and the first guard
//! whose `when` fully matches supplies the overrides. Later guards are never
//! inspected once one matches. Without a match the rule's base values apply.
//!
//! A missing policy yields an empty decision list and the `"none"` policy id.
//! Output depends only on `(rulebook, context, platform)`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::core::context::UxContext;
use crate::core::decision::Evaluation;
use crate::core::decision::PolicyMeta;
use crate::core::decision::UxDecision;
use crate::core::identifiers::PolicyId;
use crate::core::rulebook::Guard;
use crate::core::rulebook::Policy;
use crate::core::rulebook::PolicyPlatform;
use crate::core::rulebook::Rule;
use crate::core::rulebook::Rulebook;
use crate::runtime::comparator::condition_matches;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Evaluates the rulebook policy for `platform` against the context.
#[must_use]
pub fn evaluate(rulebook: &Rulebook, context: &UxContext, platform: PolicyPlatform) -> Evaluation {
    let Some(policy) = rulebook.policy_for(platform) else {
        return Evaluation {
            decisions: Vec::new(),
            policy_meta: policy_meta(rulebook, PolicyId::none(), platform, 0),
        };
    };
    let decisions = policy.rules.iter().map(|rule| evaluate_rule(policy, rule, context)).collect();
    Evaluation {
        decisions,
        policy_meta: policy_meta(rulebook, policy.policy_id.clone(), platform, policy.rules.len()),
    }
}

/// Builds the policy metadata block.
fn policy_meta(rulebook: &Rulebook, policy_id: PolicyId, platform: PolicyPlatform, rule_count: usize) -> PolicyMeta {
    PolicyMeta {
        policy_id,
        platform,
        rulebook_version: rulebook.version.clone(),
        order: rulebook.evaluation.order.clone(),
        fallback: rulebook.evaluation.fallback.clone(),
        rule_count,
    }
}

/// Evaluates one rule.
fn evaluate_rule(policy: &Policy, rule: &Rule, context: &UxContext) -> UxDecision {
    let matched = rule.guards.iter().enumerate().find(|(_, guard)| condition_matches(&guard.when, context));
    let mut decision = UxDecision {
        rule_id: rule.id.clone(),
        family: rule.family,
        event: rule.event,
        action: rule.action,
        priority: policy.base_priority(rule),
        confidence: policy.base_confidence(rule),
        matched_guard_index: None,
        alternatives: rule.alternatives.clone(),
        meta: rule.meta.clone(),
    };
    if let Some((index, guard)) = matched {
        apply_guard(&mut decision, guard);
        decision.matched_guard_index = Some(index);
    }
    decision
}

/// Applies a matched guard's overrides to a decision.
fn apply_guard(decision: &mut UxDecision, guard: &Guard) {
    let outcome = &guard.then;
    if let Some(action) = outcome.action {
        decision.action = action;
    }
    if let Some(priority) = outcome.priority {
        decision.priority = priority;
    }
    if let Some(confidence) = outcome.confidence {
        decision.confidence = confidence;
    }
    if let Some(meta) = &outcome.meta {
        merge_meta(&mut decision.meta, meta);
    }
    if let Some(style) = &outcome.style {
        decision.meta.insert("style".to_string(), style.clone());
    }
    if let Some(placement) = &outcome.placement {
        decision.meta.insert("placement".to_string(), placement.clone());
    }
}

/// Shallow-merges `overrides` over `base`.
fn merge_meta(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
}
