// crates/meds-core/src/core/decision.rs
// ============================================================================
// Module: MEDS UX Decisions
// Description: Evaluator outputs and policy metadata.
// Purpose: Carry per-rule outcomes from the evaluator to the integrator.
// Dependencies: crate::core::{identifiers, rulebook}, serde, serde_json
// ============================================================================

//! ## Overview
//! Decisions are pure outputs: one per rule, never mutated after evaluation.
//! `matchedGuardIndex` serializes as `-1` when the rule's base action applied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::PolicyId;
use crate::core::identifiers::RuleId;
use crate::core::rulebook::PolicyPlatform;
use crate::core::rulebook::Priority;
use crate::core::rulebook::RuleFamily;
use crate::core::rulebook::TriggerEvent;
use crate::core::rulebook::UxAction;

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Outcome of evaluating one rule against a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UxDecision {
    /// Source rule.
    pub rule_id: RuleId,
    /// Rule family.
    pub family: RuleFamily,
    /// Trigger event.
    pub event: TriggerEvent,
    /// Final action after guard resolution.
    pub action: UxAction,
    /// Final priority.
    pub priority: Priority,
    /// Final confidence.
    pub confidence: f64,
    /// Index of the matched guard, or `None` when no guard matched.
    #[serde(serialize_with = "serialize_guard_index", deserialize_with = "deserialize_guard_index")]
    pub matched_guard_index: Option<usize>,
    /// Alternative actions declared on the rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<UxAction>,
    /// Merged metadata.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl UxDecision {
    /// Returns a meta value as an unsigned integer, if present and numeric.
    #[must_use]
    pub fn meta_u64(&self, key: &str) -> Option<u64> {
        self.meta.get(key).and_then(Value::as_u64)
    }
}

/// Serializes a guard index, mapping `None` to `-1`.
fn serialize_guard_index<S: Serializer>(
    index: &Option<usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match index.and_then(|value| i64::try_from(value).ok()) {
        Some(value) => serializer.serialize_i64(value),
        None => serializer.serialize_i64(-1),
    }
}

/// Deserializes a guard index, mapping negative values to `None`.
fn deserialize_guard_index<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(usize::try_from(raw).ok())
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Metadata describing the policy an evaluation used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyMeta {
    /// Selected policy, or `"none"`.
    pub policy_id: PolicyId,
    /// Policy platform the evaluation was scoped to.
    pub platform: PolicyPlatform,
    /// Rulebook version.
    pub rulebook_version: String,
    /// Guard scan order label.
    pub order: String,
    /// Fallback label.
    pub fallback: String,
    /// Number of rules in the selected policy.
    pub rule_count: usize,
}

/// Evaluator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// One decision per rule, in rule order.
    pub decisions: Vec<UxDecision>,
    /// Policy metadata.
    pub policy_meta: PolicyMeta,
}

impl Evaluation {
    /// Returns true when no policy matched the platform.
    #[must_use]
    pub fn is_unscoped(&self) -> bool {
        self.policy_meta.policy_id.is_none()
    }
}
