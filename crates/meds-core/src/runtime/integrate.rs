// crates/meds-core/src/runtime/integrate.rs
// ============================================================================
// Module: MEDS Integrator
// Description: Folds UX decisions back into a validated spec.
// Purpose: Synthesize components, backfill tokens, and derive UX blocks.
// Dependencies: crate::core, crate::runtime::normalize
// ============================================================================

//! ## Overview
//! [`integrate`] returns a new spec and never violates the validated
//! invariants. Every change is additive or monotonic: components are only
//! added when their type is absent, colors are only backfilled, density only
//! moves from compact to comfortable, and gaps are only raised. Running it
//! twice with the same evaluation adds nothing the first run did not.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::decision::Evaluation;
use crate::core::decision::UxDecision;
use crate::core::identifiers::ComponentId;
use crate::core::rulebook::PolicyPlatform;
use crate::core::rulebook::RuleFamily;
use crate::core::rulebook::TriggerEvent;
use crate::core::rulebook::UxAction;
use crate::core::spec::AccessibilityBlock;
use crate::core::spec::ColorEntry;
use crate::core::spec::ColorToken;
use crate::core::spec::Component;
use crate::core::spec::ComponentType;
use crate::core::spec::Density;
use crate::core::spec::DesignSpec;
use crate::core::spec::EmptyPresentation;
use crate::core::spec::ErrorPresentation;
use crate::core::spec::FeedbackPattern;
use crate::core::spec::FeedbackTiming;
use crate::core::spec::LoadingPresentation;
use crate::core::spec::NavigationPattern;
use crate::core::spec::NavigationTopology;
use crate::core::spec::PatternBlock;
use crate::core::spec::StateBlock;
use crate::runtime::normalize::unique_id;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Section gap floor applied when targets must be enlarged.
pub const SECTION_GAP_FLOOR_PX: u32 = 32;
/// Page gap floor applied when targets must be enlarged.
pub const PAGE_GAP_FLOOR_PX: u32 = 24;
/// Target size applied by `enlargeTarget` decisions.
pub const ENLARGED_TARGET_PX: u32 = 48;
/// Decision meta key carrying an explicit minimum target size.
pub const MIN_TARGET_META_KEY: &str = "minTargetPx";
/// Prefix of synthesized component ids.
const SYNTHESIZED_ID_PREFIX: &str = "ux-";

/// Colors backfilled for every policy.
const REQUIRED_COLORS: [(ColorToken, &str, &str); 2] = [
    (ColorToken::Warning, "#F59E0B", "warnings and caution states"),
    (ColorToken::Overlay, "#0F172A80", "scrim behind modal surfaces"),
];

/// Colors backfilled for desktop policies.
const DESKTOP_COLORS: [(ColorToken, &str, &str); 2] = [
    (ColorToken::Accent, "#7C3AED", "accent highlights"),
    (ColorToken::Surface, "#FFFFFF", "page background"),
];

// ============================================================================
// SECTION: Action Mapping
// ============================================================================

/// Returns the component type an action requires on screen, if any.
#[must_use]
pub const fn component_for_action(action: UxAction) -> Option<ComponentType> {
    match action {
        UxAction::Toast | UxAction::UndoToast => Some(ComponentType::Alert),
        UxAction::Modal | UxAction::ConfirmDialog => Some(ComponentType::Modal),
        UxAction::Drawer | UxAction::BottomSheet => Some(ComponentType::Drawer),
        UxAction::Skeleton => Some(ComponentType::Card),
        UxAction::Progress => Some(ComponentType::Badge),
        UxAction::Menu => Some(ComponentType::ListItem),
        UxAction::Route
        | UxAction::Popover
        | UxAction::Tooltip
        | UxAction::InlineEdit
        | UxAction::Expand
        | UxAction::Spinner
        | UxAction::EnlargeTarget
        | UxAction::ReduceMotion => None,
    }
}

/// Returns the layout rank of a component type (lower sorts first).
#[must_use]
pub const fn component_rank(kind: ComponentType) -> u8 {
    match kind {
        ComponentType::AppBar | ComponentType::NavBar => 0,
        ComponentType::Tabs | ComponentType::Breadcrumbs | ComponentType::Toolbar => 1,
        ComponentType::Sidebar | ComponentType::Drawer => 2,
        ComponentType::Modal => 3,
        ComponentType::Table | ComponentType::List => 4,
        ComponentType::Card | ComponentType::ListItem => 5,
        ComponentType::TextField
        | ComponentType::TextArea
        | ComponentType::Select
        | ComponentType::Checkbox
        | ComponentType::RadioGroup
        | ComponentType::Switch => 6,
        ComponentType::Button | ComponentType::IconButton | ComponentType::Fab => 7,
        ComponentType::Alert => 8,
        ComponentType::Image | ComponentType::Avatar => 9,
        ComponentType::Badge => 10,
    }
}

// ============================================================================
// SECTION: Integration
// ============================================================================

/// Folds decisions into a validated spec.
#[must_use]
pub fn integrate(spec: &DesignSpec, evaluation: &Evaluation) -> DesignSpec {
    let decisions = evaluation.decisions.as_slice();
    let mut enhanced = spec.clone();

    enhanced.components = synthesize_components(&spec.components, decisions);
    backfill_colors(&mut enhanced, desktop_policy(evaluation));
    adjust_composition(&mut enhanced, decisions);

    enhanced.patterns = Some(derive_patterns(spec, decisions));
    enhanced.accessibility = Some(derive_accessibility(spec, evaluation));
    enhanced.states = Some(derive_states(spec, decisions));
    enhanced
}

/// Returns true when the evaluation used a desktop policy.
fn desktop_policy(evaluation: &Evaluation) -> bool {
    !evaluation.is_unscoped() && evaluation.policy_meta.platform == PolicyPlatform::Desktop
}

/// Adds missing action components and sorts by layout rank.
fn synthesize_components(existing: &[Component], decisions: &[UxDecision]) -> Vec<Component> {
    let mut merged = existing.to_vec();
    let mut used_ids: BTreeSet<String> = merged.iter().map(|component| component.id.as_str().to_string()).collect();
    for decision in decisions {
        let Some(kind) = component_for_action(decision.action) else {
            continue;
        };
        if merged.iter().any(|component| component.component_type == kind) {
            continue;
        }
        let id = unique_id(&format!("{SYNTHESIZED_ID_PREFIX}{}", decision.rule_id), &used_ids);
        used_ids.insert(id.clone());
        merged.push(Component {
            id: ComponentId::new(id),
            component_type: kind,
            variants: vec![decision.action.as_str().to_string()],
            states: Vec::new(),
            style: None,
            confidence: decision.confidence,
        });
    }
    merged.sort_by_key(|component| component_rank(component.component_type));
    merged
}

/// Backfills semantic colors without overwriting existing tokens.
fn backfill_colors(spec: &mut DesignSpec, desktop: bool) {
    let extra: &[(ColorToken, &str, &str)] = if desktop { &DESKTOP_COLORS } else { &[] };
    for (token, hex, usage) in REQUIRED_COLORS.iter().chain(extra) {
        if !spec.has_color(*token) {
            spec.foundations.color.push(ColorEntry::new(*token, hex, usage));
        }
    }
}

/// Returns true when a decision implies a minimum hit target.
fn requires_min_target(decision: &UxDecision) -> bool {
    decision.family == RuleFamily::Target
        || decision.action == UxAction::EnlargeTarget
        || decision.meta.contains_key(MIN_TARGET_META_KEY)
}

/// Raises density and gaps according to decisions.
fn adjust_composition(spec: &mut DesignSpec, decisions: &[UxDecision]) {
    let composition = &mut spec.composition;
    let edits_or_confirms =
        decisions.iter().any(|decision| matches!(decision.family, RuleFamily::Edit | RuleFamily::Confirm));
    if edits_or_confirms && composition.density == Density::Compact {
        composition.density = Density::Comfortable;
    }
    if decisions.iter().any(requires_min_target) {
        composition.section_gap_px = composition.section_gap_px.at_least(SECTION_GAP_FLOOR_PX);
        composition.page_gap_px = composition.page_gap_px.at_least(PAGE_GAP_FLOOR_PX);
    }
}

// ============================================================================
// SECTION: Derived Blocks
// ============================================================================

/// Returns the first decision of a family.
fn first_of(decisions: &[UxDecision], family: RuleFamily) -> Option<&UxDecision> {
    decisions.iter().find(|decision| decision.family == family)
}

/// Classifies navigation topology and feedback timing.
fn derive_patterns(spec: &DesignSpec, decisions: &[UxDecision]) -> PatternBlock {
    let navigation_action = first_of(decisions, RuleFamily::Navigation).map(|decision| decision.action);
    let topology = if spec.has_component(ComponentType::Sidebar) {
        NavigationTopology::Sidebar
    } else if matches!(navigation_action, Some(UxAction::Drawer | UxAction::BottomSheet)) {
        NavigationTopology::Drawer
    } else if spec.has_component(ComponentType::Tabs) {
        NavigationTopology::Tabbed
    } else if spec.components.iter().any(|component| component.component_type.is_top_navigation()) {
        NavigationTopology::TopNav
    } else if spec.has_component(ComponentType::Drawer) {
        NavigationTopology::Drawer
    } else {
        NavigationTopology::Flat
    };
    let feedback_action = first_of(decisions, RuleFamily::Feedback).map(|decision| decision.action);
    PatternBlock {
        navigation: NavigationPattern {
            topology,
            details_action: first_of(decisions, RuleFamily::Details).map(|decision| decision.action),
        },
        feedback: FeedbackPattern {
            timing: feedback_action.map_or(FeedbackTiming::Inline, feedback_timing),
            action: feedback_action,
        },
    }
}

/// Maps a feedback action onto its timing class.
const fn feedback_timing(action: UxAction) -> FeedbackTiming {
    match action {
        UxAction::Toast | UxAction::UndoToast => FeedbackTiming::Transient,
        UxAction::Progress | UxAction::Spinner | UxAction::Skeleton => FeedbackTiming::Progressive,
        UxAction::Modal | UxAction::ConfirmDialog => FeedbackTiming::Blocking,
        _ => FeedbackTiming::Inline,
    }
}

/// Derives keyboard, contrast, and target-size flags.
fn derive_accessibility(spec: &DesignSpec, evaluation: &Evaluation) -> AccessibilityBlock {
    let decisions = evaluation.decisions.as_slice();
    let a11y = &spec.foundations.a11y;
    let keyboard_navigation =
        desktop_policy(evaluation) || decisions.iter().any(|decision| decision.event == TriggerEvent::Focus);
    let explicit_target = decisions
        .iter()
        .filter_map(|decision| decision.meta_u64(MIN_TARGET_META_KEY))
        .map(|target| u32::try_from(target).unwrap_or(u32::MAX))
        .max();
    let enlarged = decisions
        .iter()
        .any(|decision| decision.action == UxAction::EnlargeTarget)
        .then_some(ENLARGED_TARGET_PX);
    let min_target_px = [explicit_target, enlarged]
        .into_iter()
        .flatten()
        .fold(a11y.min_hit_area_px, u32::max);
    AccessibilityBlock {
        keyboard_navigation,
        focus_visible: keyboard_navigation && a11y.focus_ring.width_px > 0,
        contrast: a11y.contrast,
        min_target_px,
        touch_targets_enforced: decisions.iter().any(requires_min_target),
        reduced_motion: decisions.iter().any(|decision| decision.action == UxAction::ReduceMotion),
    }
}

/// Derives loading, empty, and error presentation.
fn derive_states(spec: &DesignSpec, decisions: &[UxDecision]) -> StateBlock {
    let loading = decisions
        .iter()
        .find_map(|decision| match decision.action {
            UxAction::Skeleton => Some(LoadingPresentation::Skeleton),
            UxAction::Progress => Some(LoadingPresentation::Progress),
            UxAction::Spinner => Some(LoadingPresentation::Spinner),
            _ => None,
        })
        .unwrap_or(LoadingPresentation::None);
    let has_collection = spec.has_component(ComponentType::Table)
        || spec.components.iter().any(|component| component.component_type.is_collection());
    let empty = if has_collection { EmptyPresentation::Illustrated } else { EmptyPresentation::Message };
    let feedback_action = first_of(decisions, RuleFamily::Feedback).map(|decision| decision.action);
    let error = match feedback_action.map(feedback_timing) {
        Some(FeedbackTiming::Transient) => ErrorPresentation::Toast,
        Some(FeedbackTiming::Blocking) => ErrorPresentation::Modal,
        _ => ErrorPresentation::Inline,
    };
    StateBlock {
        loading,
        empty,
        error,
    }
}
