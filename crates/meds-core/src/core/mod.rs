// crates/meds-core/src/core/mod.rs
// ============================================================================
// Module: MEDS Core Types
// Description: Canonical design spec, rulebook, context, and decision types.
// Purpose: Provide stable, serializable types shared by every pipeline stage.
// Dependencies: serde, serde_json, sha2, thiserror
// ============================================================================

//! ## Overview
//! Core types define the validated design spec, the UX rulebook, the derived
//! UX context, and evaluator decisions. These types are the canonical source
//! of truth for the published JSON schema and for persisted snapshots.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod context;
pub mod decision;
pub mod hashing;
pub mod identifiers;
pub mod rulebook;
pub mod schema;
pub mod spec;
pub mod violation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::ContentType;
pub use context::UxContext;
pub use decision::Evaluation;
pub use decision::PolicyMeta;
pub use decision::UxDecision;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use hashing::canonical_json_bytes;
pub use hashing::hash_bytes;
pub use hashing::hash_canonical_json;
pub use identifiers::ComponentId;
pub use identifiers::PolicyId;
pub use identifiers::RuleId;
pub use identifiers::SpecId;
pub use rulebook::Guard;
pub use rulebook::GuardCondition;
pub use rulebook::GuardExpectation;
pub use rulebook::GuardOutcome;
pub use rulebook::GuardPredicate;
pub use rulebook::Policy;
pub use rulebook::PolicyDefaults;
pub use rulebook::PolicyPlatform;
pub use rulebook::Priority;
pub use rulebook::Rule;
pub use rulebook::RuleFamily;
pub use rulebook::Rulebook;
pub use rulebook::RulebookError;
pub use rulebook::TriggerEvent;
pub use rulebook::UxAction;
pub use schema::design_spec_schema;
pub use spec::A11y;
pub use spec::AccessibilityBlock;
pub use spec::ColorEntry;
pub use spec::ColorToken;
pub use spec::Component;
pub use spec::ComponentType;
pub use spec::Composition;
pub use spec::ContrastClass;
pub use spec::Density;
pub use spec::DesignSpec;
pub use spec::EmptyPresentation;
pub use spec::ErrorPresentation;
pub use spec::FeedbackTiming;
pub use spec::Foundations;
pub use spec::LoadingPresentation;
pub use spec::NavigationTopology;
pub use spec::PatternBlock;
pub use spec::PixelValue;
pub use spec::Platform;
pub use spec::StateBlock;
pub use violation::SpecViolation;
