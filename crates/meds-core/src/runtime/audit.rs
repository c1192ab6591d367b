// crates/meds-core/src/runtime/audit.rs
// ============================================================================
// Module: MEDS Pipeline Audit Logging
// Description: Structured audit events for pipeline runs.
// Purpose: Emit one JSON-line record per run without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every pipeline run records exactly one [`PipelineAuditEvent`]. Events carry
//! counts, identifiers, and outcome labels only; the raw AI payload is never
//! logged. Sinks are deliberately small so deployments can route events to
//! their preferred logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::spec::Platform;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Pipeline run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Spec integrated (and persisted when requested).
    Ok,
    /// Input failed validation.
    Rejected,
    /// Run failed for a non-input reason (size limit, hashing, storage).
    Error,
}

/// Pipeline audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Run outcome.
    pub outcome: PipelineOutcome,
    /// Content-derived spec id when integration completed.
    pub spec_id: Option<String>,
    /// Policy id used for evaluation.
    pub policy_id: Option<String>,
    /// Viewport platform of the validated spec.
    pub platform: Option<Platform>,
    /// Raw input size in bytes.
    pub input_bytes: usize,
    /// Component count after integration.
    pub component_count: usize,
    /// Number of UX decisions.
    pub decision_count: usize,
    /// Number of validation violations.
    pub violation_count: usize,
    /// Whether the spec was persisted.
    pub persisted: bool,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
}

/// Inputs required to construct a pipeline audit event.
#[derive(Debug, Clone)]
pub struct PipelineAuditEventParams {
    /// Run outcome.
    pub outcome: PipelineOutcome,
    /// Content-derived spec id.
    pub spec_id: Option<String>,
    /// Policy id used for evaluation.
    pub policy_id: Option<String>,
    /// Viewport platform.
    pub platform: Option<Platform>,
    /// Raw input size in bytes.
    pub input_bytes: usize,
    /// Component count after integration.
    pub component_count: usize,
    /// Number of UX decisions.
    pub decision_count: usize,
    /// Number of validation violations.
    pub violation_count: usize,
    /// Whether the spec was persisted.
    pub persisted: bool,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
}

impl PipelineAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: PipelineAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "meds_pipeline",
            timestamp_ms,
            outcome: params.outcome,
            spec_id: params.spec_id,
            policy_id: params.policy_id,
            platform: params.platform,
            input_bytes: params.input_bytes,
            component_count: params.component_count,
            decision_count: params.decision_count,
            violation_count: params.violation_count,
            persisted: params.persisted,
            error_kind: params.error_kind,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for pipeline events.
pub trait PipelineAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &PipelineAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl PipelineAuditSink for StderrAuditSink {
    fn record(&self, event: &PipelineAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl PipelineAuditSink for FileAuditSink {
    fn record(&self, event: &PipelineAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl PipelineAuditSink for NoopAuditSink {
    fn record(&self, _event: &PipelineAuditEvent) {}
}

/// Audit sink that keeps events in memory, for tests and embedding callers.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events.
    events: Mutex<Vec<PipelineAuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<PipelineAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl PipelineAuditSink for MemoryAuditSink {
    fn record(&self, event: &PipelineAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
