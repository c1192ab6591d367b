// crates/meds-core/src/runtime/mod.rs
// ============================================================================
// Module: MEDS Runtime
// Description: Pipeline stages, orchestration, audit sinks, and helpers.
// Purpose: Execute the deterministic MEDS pipeline over raw AI output.
// Dependencies: crate::{core, interfaces}, regex-lite, serde_json
// ============================================================================

//! ## Overview
//! Runtime modules implement the five pipeline stages (normalize, validate,
//! derive context, evaluate, integrate) and the [`SpecPipeline`] that composes
//! them. Every stage is a pure function of its inputs; only the pipeline
//! touches the audit sink and the spec store.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod comparator;
pub mod context;
pub mod evaluator;
pub mod integrate;
pub mod normalize;
pub mod pipeline;
pub mod store;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::PipelineAuditEvent;
pub use audit::PipelineAuditSink;
pub use audit::PipelineOutcome;
pub use audit::StderrAuditSink;
pub use context::derive_context;
pub use evaluator::evaluate;
pub use integrate::integrate;
pub use normalize::normalize;
pub use normalize::quantize8;
pub use pipeline::DEFAULT_MAX_INPUT_BYTES;
pub use pipeline::PipelineError;
pub use pipeline::PipelineOutput;
pub use pipeline::SpecPipeline;
pub use store::InMemorySpecStore;
pub use validate::validate_and_fill;
