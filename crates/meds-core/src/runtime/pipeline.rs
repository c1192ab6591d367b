// crates/meds-core/src/runtime/pipeline.rs
// ============================================================================
// Module: MEDS Pipeline
// Description: End-to-end orchestration of the five pipeline stages.
// Purpose: Turn one raw AI document into an integrated, content-addressed spec.
// Dependencies: crate::core, crate::interfaces, crate::runtime, serde_json
// ============================================================================

//! ## Overview
//! [`SpecPipeline`] composes normalize, validate, derive-context, evaluate and
//! integrate for a single raw document. The integrated spec is hashed with
//! RFC 8785 canonical JSON to obtain its [`SpecId`], optionally saved through
//! a [`SpecStore`], and every run (successful or not) records exactly one
//! [`PipelineAuditEvent`].
//!
//! Security posture: raw input is untrusted; the byte limit is enforced before
//! parsing and the raw payload never reaches the audit sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::context::UxContext;
use crate::core::decision::Evaluation;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::SpecId;
use crate::core::rulebook::PolicyPlatform;
use crate::core::rulebook::Rulebook;
use crate::core::spec::DesignSpec;
use crate::core::spec::Platform;
use crate::core::violation::SpecViolation;
use crate::interfaces::SpecStore;
use crate::interfaces::StoreError;
use crate::runtime::audit::NoopAuditSink;
use crate::runtime::audit::PipelineAuditEvent;
use crate::runtime::audit::PipelineAuditEventParams;
use crate::runtime::audit::PipelineAuditSink;
use crate::runtime::audit::PipelineOutcome;
use crate::runtime::context::derive_context;
use crate::runtime::evaluator::evaluate;
use crate::runtime::integrate::integrate;
use crate::runtime::normalize::normalize;
use crate::runtime::validate::validate_and_fill;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum raw input size in bytes.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pipeline errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Raw input exceeds the configured size limit.
    #[error("input exceeds size limit ({actual_bytes} > {max_bytes} bytes)")]
    InputTooLarge {
        /// Configured limit.
        max_bytes: usize,
        /// Actual input size.
        actual_bytes: usize,
    },
    /// Raw input is not JSON.
    #[error("input is not valid json: {0}")]
    InvalidJson(String),
    /// Normalized document failed validation.
    #[error("design spec rejected with {} violation(s)", .0.len())]
    Rejected(Vec<SpecViolation>),
    /// Canonical hashing failed.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PipelineError {
    /// Returns the stable label recorded in audit events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InputTooLarge {
                ..
            } => "input_too_large",
            Self::InvalidJson(_) => "invalid_json",
            Self::Rejected(_) => "rejected",
            Self::Hash(_) => "hash",
            Self::Store(_) => "store",
        }
    }

    /// Returns the violations when the error is a validation rejection.
    #[must_use]
    pub fn violations(&self) -> &[SpecViolation] {
        match self {
            Self::Rejected(violations) => violations,
            _ => &[],
        }
    }
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Result of one successful pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput {
    /// Content-derived identifier of the integrated spec.
    pub spec_id: SpecId,
    /// Integrated spec.
    pub spec: DesignSpec,
    /// Context the rulebook was evaluated against.
    pub context: UxContext,
    /// Evaluator output.
    pub evaluation: Evaluation,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Deterministic spec pipeline.
pub struct SpecPipeline {
    /// Rulebook used for evaluation.
    rulebook: Arc<Rulebook>,
    /// Audit sink receiving one event per run.
    audit: Arc<dyn PipelineAuditSink>,
    /// Optional persistence collaborator.
    store: Option<Arc<dyn SpecStore>>,
    /// Maximum raw input size in bytes.
    max_input_bytes: usize,
    /// Policy platform forced for every run.
    platform_override: Option<PolicyPlatform>,
}

impl SpecPipeline {
    /// Creates a pipeline with a no-op audit sink and no store.
    #[must_use]
    pub fn new(rulebook: Arc<Rulebook>) -> Self {
        Self {
            rulebook,
            audit: Arc::new(NoopAuditSink),
            store: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            platform_override: None,
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn PipelineAuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Persists every integrated spec through `store`.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SpecStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the raw input size limit.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    /// Evaluates every run against `platform` instead of the viewport's policy.
    #[must_use]
    pub const fn with_platform_override(mut self, platform: Option<PolicyPlatform>) -> Self {
        self.platform_override = platform;
        self
    }

    /// Returns the rulebook used for evaluation.
    #[must_use]
    pub fn rulebook(&self) -> &Rulebook {
        &self.rulebook
    }

    /// Runs the pipeline over raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when the input is oversized, not JSON,
    /// rejected by validation, or cannot be hashed or persisted.
    pub fn run(&self, raw: &[u8]) -> Result<PipelineOutput, PipelineError> {
        let mut record = RunRecord::new(raw.len());
        let result = self.run_bytes(raw, &mut record);
        self.record(&record, &result);
        result
    }

    /// Runs the pipeline over an already parsed document.
    ///
    /// Audit events report zero input bytes for in-memory documents.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when validation rejects the document or the
    /// output cannot be hashed or persisted.
    pub fn process(&self, raw: &Value) -> Result<PipelineOutput, PipelineError> {
        let mut record = RunRecord::new(0);
        let result = self.run_document(raw, &mut record);
        self.record(&record, &result);
        result
    }

    /// Enforces the size limit and parses raw bytes.
    fn run_bytes(&self, raw: &[u8], record: &mut RunRecord) -> Result<PipelineOutput, PipelineError> {
        if raw.len() > self.max_input_bytes {
            return Err(PipelineError::InputTooLarge {
                max_bytes: self.max_input_bytes,
                actual_bytes: raw.len(),
            });
        }
        let document: Value =
            serde_json::from_slice(raw).map_err(|err| PipelineError::InvalidJson(err.to_string()))?;
        self.run_document(&document, record)
    }

    /// Runs stages 1 through 5, hashing and persistence.
    fn run_document(&self, raw: &Value, record: &mut RunRecord) -> Result<PipelineOutput, PipelineError> {
        let normalized = normalize(raw);
        let validated = validate_and_fill(&normalized).map_err(PipelineError::Rejected)?;
        record.platform = Some(validated.viewport_profile.platform);

        let context = derive_context(&validated);
        let platform =
            self.platform_override.unwrap_or_else(|| validated.viewport_profile.platform.policy_platform());
        let evaluation = evaluate(&self.rulebook, &context, platform);
        record.policy_id = Some(evaluation.policy_meta.policy_id.to_string());
        record.decision_count = evaluation.decisions.len();

        let spec = integrate(&validated, &evaluation);
        record.component_count = spec.components.len();
        let spec_id = hash_canonical_json(DEFAULT_HASH_ALGORITHM, &spec)?.to_spec_id();
        record.spec_id = Some(spec_id.to_string());

        if let Some(store) = &self.store {
            store.save(&spec_id, &spec)?;
            record.persisted = true;
        }

        Ok(PipelineOutput {
            spec_id,
            spec,
            context,
            evaluation,
        })
    }

    /// Emits the audit event for a finished run.
    fn record(&self, record: &RunRecord, result: &Result<PipelineOutput, PipelineError>) {
        let (outcome, violation_count, error_kind) = match result {
            Ok(_) => (PipelineOutcome::Ok, 0, None),
            Err(err @ PipelineError::Rejected(violations)) => {
                (PipelineOutcome::Rejected, violations.len(), Some(err.kind()))
            }
            Err(err) => (PipelineOutcome::Error, 0, Some(err.kind())),
        };
        let event = PipelineAuditEvent::new(PipelineAuditEventParams {
            outcome,
            spec_id: record.spec_id.clone(),
            policy_id: record.policy_id.clone(),
            platform: record.platform,
            input_bytes: record.input_bytes,
            component_count: record.component_count,
            decision_count: record.decision_count,
            violation_count,
            persisted: record.persisted,
            error_kind,
        });
        self.audit.record(&event);
    }
}

/// Facts collected while a run progresses.
#[derive(Debug, Default)]
struct RunRecord {
    /// Raw input size in bytes.
    input_bytes: usize,
    /// Validated viewport platform.
    platform: Option<Platform>,
    /// Evaluated policy id.
    policy_id: Option<String>,
    /// Decision count.
    decision_count: usize,
    /// Integrated component count.
    component_count: usize,
    /// Content-derived spec id.
    spec_id: Option<String>,
    /// Whether the spec was saved.
    persisted: bool,
}

impl RunRecord {
    /// Starts a record for an input of `input_bytes`.
    fn new(input_bytes: usize) -> Self {
        Self {
            input_bytes,
            ..Self::default()
        }
    }
}
