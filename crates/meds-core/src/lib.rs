// crates/meds-core/src/lib.rs
// ============================================================================
// Module: MEDS Core Library
// Description: Public API surface for the MEDS pipeline.
// Purpose: Expose the spec model, rulebook model, interfaces, and stages.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! MEDS turns untrusted, AI-extracted screenshot descriptions into a
//! canonical design spec. The pipeline normalizes raw JSON, validates it and
//! fills defaults, derives a UX context, evaluates a guarded UX rulebook with
//! first-match-wins semantics, and folds the resulting decisions back into the
//! spec. Every stage is deterministic and free of network access.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::SpecStore;
pub use interfaces::StoreError;
pub use runtime::DEFAULT_MAX_INPUT_BYTES;
pub use runtime::FileAuditSink;
pub use runtime::InMemorySpecStore;
pub use runtime::MemoryAuditSink;
pub use runtime::NoopAuditSink;
pub use runtime::PipelineAuditEvent;
pub use runtime::PipelineAuditSink;
pub use runtime::PipelineError;
pub use runtime::PipelineOutcome;
pub use runtime::PipelineOutput;
pub use runtime::SpecPipeline;
pub use runtime::StderrAuditSink;
pub use runtime::derive_context;
pub use runtime::evaluate;
pub use runtime::integrate;
pub use runtime::normalize;
pub use runtime::validate_and_fill;
