// crates/meds-core/src/runtime/comparator.rs
// ============================================================================
// Module: MEDS Guard Comparator Logic
// Description: Predicate evaluation for rulebook guards.
// Purpose: Convert context values into tri-state predicate outcomes.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! Guard predicates evaluate to a [`TriState`]. Missing context values and
//! type mismatches (for example a numeric comparator against a boolean) yield
//! `Unknown`, and a guard only matches when every predicate is `True`, so
//! evaluation fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::context::UxContext;
use crate::core::rulebook::GuardCondition;
use crate::core::rulebook::GuardExpectation;

// ============================================================================
// SECTION: Tri-State
// ============================================================================

/// Three-valued predicate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    /// Predicate holds.
    True,
    /// Predicate does not hold.
    False,
    /// Predicate could not be decided.
    Unknown,
}

impl TriState {
    /// Returns true only for [`TriState::True`].
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

// ============================================================================
// SECTION: Guard Evaluation
// ============================================================================

/// Returns true when every predicate of the condition holds for the context.
#[must_use]
pub fn condition_matches(condition: &GuardCondition, context: &UxContext) -> bool {
    condition.predicates.iter().all(|predicate| {
        let actual = context.value_of(&predicate.key);
        evaluate_expectation(&predicate.expected, actual.as_ref()).is_true()
    })
}

/// Evaluates one expectation against a context value.
#[must_use]
pub fn evaluate_expectation(expected: &GuardExpectation, actual: Option<&Value>) -> TriState {
    let Some(actual) = actual else {
        return TriState::Unknown;
    };
    match expected {
        GuardExpectation::Equals(value) => TriState::from(values_equal(value, actual)),
        GuardExpectation::InSet(values) => {
            TriState::from(values.iter().any(|value| values_equal(value, actual)))
        }
        GuardExpectation::GreaterThan(threshold) => {
            numeric(actual).map_or(TriState::Unknown, |number| TriState::from(number > f64::from(*threshold)))
        }
        GuardExpectation::GreaterThanOrEqual(threshold) => {
            numeric(actual).map_or(TriState::Unknown, |number| TriState::from(number >= f64::from(*threshold)))
        }
    }
}

/// Compares JSON scalars, treating numerically equal numbers as equal.
fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(left), Value::Number(right)) => match (left.as_f64(), right.as_f64()) {
            (Some(left), Some(right)) => (left - right).abs() < f64::EPSILON,
            _ => false,
        },
        _ => expected == actual,
    }
}

/// Reads a context value as a number; booleans and non-numeric text yield `None`.
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}
