// crates/meds-core/src/core/rulebook.rs
// ============================================================================
// Module: MEDS UX Rulebook
// Description: Declarative, platform-scoped UX decision table.
// Purpose: Model policies, rules, and guards and validate them at load time.
// Dependencies: crate::core::{context, identifiers}, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`Rulebook`] is loaded once per process and shared read-only. Guard
//! predicates are parsed into typed [`GuardExpectation`] values at load time,
//! so evaluation never re-inspects raw strings. Loading fails fast on
//! structural mistakes: unknown context keys, duplicate rule ids, duplicate
//! platforms, or confidences outside `[0, 1]`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::context::UxContext;
use crate::core::identifiers::PolicyId;
use crate::core::identifiers::RuleId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Built-in rulebook document embedded at compile time.
const BUILTIN_RULEBOOK_JSON: &str = include_str!("../../rulebooks/default-ux-rulebook.json");

/// Priority applied when neither the rule nor the policy defaults set one.
pub const DEFAULT_RULE_PRIORITY: Priority = Priority::Medium;
/// Confidence applied when neither the rule nor the policy defaults set one.
pub const DEFAULT_RULE_CONFIDENCE: f64 = 0.7;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rulebook loading and validation errors.
#[derive(Debug, Error)]
pub enum RulebookError {
    /// Rulebook document could not be read.
    #[error("rulebook io error: {0}")]
    Io(String),
    /// Rulebook document is not valid JSON for the rulebook model.
    #[error("rulebook parse error: {0}")]
    Parse(String),
    /// Rulebook document is structurally invalid.
    #[error("invalid rulebook: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Enumerations
// ============================================================================

/// Platform scope of a rulebook policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyPlatform {
    /// Desktop (and tablet) viewports.
    Desktop,
    /// Mobile viewports.
    Mobile,
}

impl PolicyPlatform {
    /// Returns the serialized platform label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for PolicyPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleFamily {
    /// Primary navigation behavior.
    Navigation,
    /// "View details" presentation.
    Details,
    /// Editing affordances.
    Edit,
    /// Contextual menus.
    Menus,
    /// Confirmation of risky actions.
    Confirm,
    /// Feedback after actions.
    Feedback,
    /// Hit target sizing.
    Target,
    /// Motion preferences.
    Motion,
}

/// Trigger events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerEvent {
    /// Pointer click or tap.
    Click,
    /// Pointer hover.
    Hover,
    /// Keyboard focus.
    Focus,
    /// Form submission.
    Submit,
}

/// Closed set of UX actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UxAction {
    /// Navigate to a new route.
    Route,
    /// Open a modal dialog.
    Modal,
    /// Open a side drawer.
    Drawer,
    /// Open a bottom sheet.
    BottomSheet,
    /// Open an anchored popover.
    Popover,
    /// Show a tooltip.
    Tooltip,
    /// Open a menu.
    Menu,
    /// Edit in place.
    InlineEdit,
    /// Expand in place.
    Expand,
    /// Ask for confirmation in a dialog.
    ConfirmDialog,
    /// Toast with an undo affordance.
    UndoToast,
    /// Transient toast.
    Toast,
    /// Skeleton placeholders.
    Skeleton,
    /// Indeterminate spinner.
    Spinner,
    /// Determinate progress indicator.
    Progress,
    /// Enlarge the hit target.
    EnlargeTarget,
    /// Reduce motion.
    ReduceMotion,
}

impl UxAction {
    /// Returns the serialized action name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Modal => "modal",
            Self::Drawer => "drawer",
            Self::BottomSheet => "bottomSheet",
            Self::Popover => "popover",
            Self::Tooltip => "tooltip",
            Self::Menu => "menu",
            Self::InlineEdit => "inlineEdit",
            Self::Expand => "expand",
            Self::ConfirmDialog => "confirmDialog",
            Self::UndoToast => "undoToast",
            Self::Toast => "toast",
            Self::Skeleton => "skeleton",
            Self::Spinner => "spinner",
            Self::Progress => "progress",
            Self::EnlargeTarget => "enlargeTarget",
            Self::ReduceMotion => "reduceMotion",
        }
    }
}

impl fmt::Display for UxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

// ============================================================================
// SECTION: Guard Expectations
// ============================================================================

/// Typed expectation parsed from a guard `when` value.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardExpectation {
    /// Scalar equality.
    Equals(Value),
    /// Membership in a list of accepted values.
    InSet(Vec<Value>),
    /// Numeric comparison `> N` (exclusive).
    GreaterThan(u32),
    /// Numeric comparison `>= N` (inclusive).
    GreaterThanOrEqual(u32),
}

impl GuardExpectation {
    /// Parses a raw `when` value.
    ///
    /// Strings shaped like `>N` or `>=N` become numeric comparators; lists
    /// become set membership; everything else is compared for equality.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::InSet(items),
            Value::String(text) => parse_threshold(&text).unwrap_or(Self::Equals(Value::String(text))),
            other => Self::Equals(other),
        }
    }

    /// Renders the expectation back into its document form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Equals(value) => value.clone(),
            Self::InSet(items) => Value::Array(items.clone()),
            Self::GreaterThan(threshold) => Value::String(format!(">{threshold}")),
            Self::GreaterThanOrEqual(threshold) => Value::String(format!(">={threshold}")),
        }
    }
}

/// Parses `>N` / `>=N` comparator strings.
fn parse_threshold(text: &str) -> Option<GuardExpectation> {
    let (inclusive, digits) = match text.strip_prefix(">=") {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('>')?),
    };
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let threshold = digits.parse::<u32>().ok()?;
    if inclusive {
        Some(GuardExpectation::GreaterThanOrEqual(threshold))
    } else {
        Some(GuardExpectation::GreaterThan(threshold))
    }
}

/// Single `key -> expectation` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardPredicate {
    /// UX context field name.
    pub key: String,
    /// Expected value.
    pub expected: GuardExpectation,
}

/// Conjunction of guard predicates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct GuardCondition {
    /// Predicates that must all hold.
    pub predicates: Vec<GuardPredicate>,
}

impl From<Map<String, Value>> for GuardCondition {
    fn from(map: Map<String, Value>) -> Self {
        let predicates = map
            .into_iter()
            .map(|(key, value)| GuardPredicate {
                key,
                expected: GuardExpectation::from_value(value),
            })
            .collect();
        Self {
            predicates,
        }
    }
}

impl From<GuardCondition> for Map<String, Value> {
    fn from(condition: GuardCondition) -> Self {
        condition
            .predicates
            .into_iter()
            .map(|predicate| (predicate.key, predicate.expected.to_value()))
            .collect()
    }
}

// ============================================================================
// SECTION: Rules and Guards
// ============================================================================

/// Override applied when a guard matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GuardOutcome {
    /// Replacement action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<UxAction>,
    /// Replacement priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Replacement confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Meta keys shallow-merged over the rule meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    /// Style hint copied into the decision meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,
    /// Placement hint copied into the decision meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Value>,
}

/// Conditional override on a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guard {
    /// Predicate over the UX context.
    pub when: GuardCondition,
    /// Override applied on match.
    #[serde(default)]
    pub then: GuardOutcome,
}

/// Rule producing exactly one decision per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule identifier (unique within its policy).
    pub id: RuleId,
    /// Rule family.
    pub family: RuleFamily,
    /// Trigger event.
    pub event: TriggerEvent,
    /// Base action.
    pub action: UxAction,
    /// Base priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Base confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Acceptable alternative actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<UxAction>,
    /// Base decision metadata.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
    /// Guards scanned in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guards: Vec<Guard>,
}

/// Policy-wide fallbacks for rule priority and confidence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolicyDefaults {
    /// Fallback priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Fallback confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Platform-scoped rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Policy identifier.
    pub policy_id: PolicyId,
    /// Platform scope.
    pub platform: PolicyPlatform,
    /// Ordered rules.
    pub rules: Vec<Rule>,
    /// Policy-wide fallbacks.
    #[serde(default)]
    pub defaults: PolicyDefaults,
}

impl Policy {
    /// Returns the effective base priority for a rule.
    #[must_use]
    pub fn base_priority(&self, rule: &Rule) -> Priority {
        rule.priority.or(self.defaults.priority).unwrap_or(DEFAULT_RULE_PRIORITY)
    }

    /// Returns the effective base confidence for a rule.
    #[must_use]
    pub fn base_confidence(&self, rule: &Rule) -> f64 {
        rule.confidence.or(self.defaults.confidence).unwrap_or(DEFAULT_RULE_CONFIDENCE)
    }
}

/// Evaluation settings echoed into policy metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSettings {
    /// Guard scan order label.
    #[serde(default = "default_order")]
    pub order: String,
    /// Fallback label when no guard matches.
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            order: default_order(),
            fallback: default_fallback(),
        }
    }
}

/// Default guard scan order label.
fn default_order() -> String {
    "first-match".to_string()
}

/// Default fallback label.
fn default_fallback() -> String {
    "base".to_string()
}

// ============================================================================
// SECTION: Rulebook
// ============================================================================

/// Versioned UX rulebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rulebook {
    /// Rulebook version.
    pub version: String,
    /// Evaluation settings.
    #[serde(default)]
    pub evaluation: EvaluationSettings,
    /// Platform-scoped policies.
    pub policies: Vec<Policy>,
}

impl Rulebook {
    /// Parses and validates a rulebook from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RulebookError::Parse`] for malformed JSON and
    /// [`RulebookError::Invalid`] for structural violations.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, RulebookError> {
        let rulebook: Self =
            serde_json::from_slice(bytes).map_err(|err| RulebookError::Parse(err.to_string()))?;
        rulebook.validate()?;
        Ok(rulebook)
    }

    /// Returns the built-in rulebook.
    ///
    /// # Errors
    ///
    /// Returns [`RulebookError`] if the embedded document is invalid.
    pub fn builtin() -> Result<Self, RulebookError> {
        Self::from_json_slice(BUILTIN_RULEBOOK_JSON.as_bytes())
    }

    /// Returns the policy scoped to the platform, if any.
    #[must_use]
    pub fn policy_for(&self, platform: PolicyPlatform) -> Option<&Policy> {
        self.policies.iter().find(|policy| policy.platform == platform)
    }

    /// Returns the total number of rules across all policies.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.policies.iter().map(|policy| policy.rules.len()).sum()
    }

    /// Validates rulebook structure.
    ///
    /// # Errors
    ///
    /// Returns [`RulebookError::Invalid`] on the first violation found.
    pub fn validate(&self) -> Result<(), RulebookError> {
        if self.version.trim().is_empty() {
            return Err(RulebookError::Invalid("version must be non-empty".to_string()));
        }
        let mut policy_ids = BTreeSet::new();
        let mut platforms = BTreeSet::new();
        for policy in &self.policies {
            if policy.policy_id.as_str().trim().is_empty() {
                return Err(RulebookError::Invalid("policyId must be non-empty".to_string()));
            }
            if !policy_ids.insert(policy.policy_id.as_str()) {
                return Err(RulebookError::Invalid(format!(
                    "duplicate policyId: {}",
                    policy.policy_id
                )));
            }
            if !platforms.insert(policy.platform) {
                return Err(RulebookError::Invalid(format!(
                    "duplicate policy platform: {}",
                    policy.platform
                )));
            }
            validate_confidence(policy.defaults.confidence, &format!("{} defaults", policy.policy_id))?;
            validate_policy_rules(policy)?;
        }
        Ok(())
    }
}

/// Validates the rules of one policy.
fn validate_policy_rules(policy: &Policy) -> Result<(), RulebookError> {
    let mut rule_ids = BTreeSet::new();
    for rule in &policy.rules {
        let location = format!("{}/{}", policy.policy_id, rule.id);
        if rule.id.as_str().trim().is_empty() {
            return Err(RulebookError::Invalid(format!(
                "{}: rule id must be non-empty",
                policy.policy_id
            )));
        }
        if !rule_ids.insert(rule.id.as_str()) {
            return Err(RulebookError::Invalid(format!("duplicate rule id: {location}")));
        }
        validate_confidence(rule.confidence, &location)?;
        for (index, guard) in rule.guards.iter().enumerate() {
            let guard_location = format!("{location}/guards/{index}");
            for predicate in &guard.when.predicates {
                if !UxContext::KEYS.contains(&predicate.key.as_str()) {
                    return Err(RulebookError::Invalid(format!(
                        "{guard_location}: unknown context key: {}",
                        predicate.key
                    )));
                }
            }
            validate_confidence(guard.then.confidence, &guard_location)?;
        }
    }
    Ok(())
}

/// Ensures an optional confidence lies within `[0, 1]`.
fn validate_confidence(confidence: Option<f64>, location: &str) -> Result<(), RulebookError> {
    match confidence {
        Some(value) if !(0.0..=1.0).contains(&value) => Err(RulebookError::Invalid(format!(
            "{location}: confidence must be within [0, 1]"
        ))),
        _ => Ok(()),
    }
}
