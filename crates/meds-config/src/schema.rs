// crates/meds-config/src/schema.rs
// ============================================================================
// Module: Config Schemas
// Description: JSON schema builder for meds.toml.
// Purpose: Publish the config shape with the same defaults the loader uses.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for MEDS configuration. Defaults are
//! taken from the runtime default functions so the two cannot drift.

use serde_json::Value;
use serde_json::json;

use crate::config::MAX_INPUT_BYTES_LIMIT;
use crate::config::MAX_TOTAL_PATH_LENGTH;
use crate::config::default_audit_enabled;
use crate::config::default_max_input_bytes;
use crate::config::default_store_busy_timeout_ms;

/// Returns the JSON schema for `meds.toml`.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "meds://schemas/config.schema.json",
        "title": "MEDS Configuration",
        "description": "Configuration for the MEDS design spec pipeline.",
        "type": "object",
        "properties": {
            "rulebook": rulebook_config_schema(),
            "input": input_config_schema(),
            "audit": audit_config_schema(),
            "store": store_config_schema(),
            "evaluation": evaluation_config_schema()
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// Schema for the rulebook section.
fn rulebook_config_schema() -> Value {
    json!({
        "type": "object",
        "description": "UX rulebook selection.",
        "properties": {
            "path": optional_path_schema("Rulebook JSON path; the built-in rulebook is used when null.")
        },
        "additionalProperties": false
    })
}

/// Schema for the input section.
fn input_config_schema() -> Value {
    json!({
        "type": "object",
        "description": "Raw input limits.",
        "properties": {
            "max_bytes": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_INPUT_BYTES_LIMIT,
                "default": default_max_input_bytes(),
                "description": "Maximum raw AI document size in bytes."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for the audit section.
fn audit_config_schema() -> Value {
    json!({
        "type": "object",
        "description": "Pipeline audit events.",
        "properties": {
            "enabled": {
                "type": "boolean",
                "default": default_audit_enabled(),
                "description": "Emit one JSON-line audit event per pipeline run."
            },
            "path": optional_path_schema("Audit log path (JSON lines); stderr when null.")
        },
        "additionalProperties": false
    })
}

/// Schema for the store section.
fn store_config_schema() -> Value {
    json!({
        "type": "object",
        "description": "Integrated spec persistence.",
        "properties": {
            "type": {
                "type": "string",
                "enum": ["memory", "sqlite"],
                "default": "memory",
                "description": "Spec store backend selection."
            },
            "path": optional_path_schema("SQLite database path."),
            "busy_timeout_ms": {
                "type": "integer",
                "minimum": 0,
                "default": default_store_busy_timeout_ms(),
                "description": "SQLite busy timeout (ms)."
            },
            "journal_mode": {
                "type": "string",
                "enum": ["wal", "delete"],
                "default": "wal",
                "description": "SQLite journal mode."
            },
            "sync_mode": {
                "type": "string",
                "enum": ["full", "normal"],
                "default": "full",
                "description": "SQLite sync mode."
            },
            "max_versions": {
                "oneOf": [
                    { "type": "null" },
                    { "type": "integer", "minimum": 1 }
                ],
                "default": null,
                "description": "Snapshots retained per spec id; unbounded when null."
            }
        },
        "allOf": [
            {
                "if": { "properties": { "type": { "const": "sqlite" } }, "required": ["type"] },
                "then": { "required": ["path"] }
            }
        ],
        "additionalProperties": false
    })
}

/// Schema for the evaluation section.
fn evaluation_config_schema() -> Value {
    json!({
        "type": "object",
        "description": "Rule evaluation overrides.",
        "properties": {
            "platform_override": {
                "oneOf": [
                    { "type": "null" },
                    { "type": "string", "enum": ["desktop", "mobile"] }
                ],
                "default": null,
                "description": "Policy platform forced for every run."
            }
        },
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Schema for an optional, length-limited path string.
fn optional_path_schema(description: &str) -> Value {
    json!({
        "oneOf": [
            { "type": "null" },
            { "type": "string", "minLength": 1, "maxLength": MAX_TOTAL_PATH_LENGTH }
        ],
        "default": null,
        "description": description
    })
}
