// crates/meds-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests for the meds binary.
// Purpose: Exercise every subcommand end to end through the compiled binary.
// Dependencies: meds-cli binary, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Runs the `meds` binary against documents, configs, and rulebooks written
//! to a temporary directory. Each test runs from its own working directory
//! with `MEDS_CONFIG` cleared so implicit config discovery stays isolated.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn meds_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_meds"))
}

fn run_meds(dir: &Path, args: &[&str]) -> Output {
    Command::new(meds_bin())
        .current_dir(dir)
        .env_remove("MEDS_CONFIG")
        .args(args)
        .output()
        .expect("run meds")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!("stdout is not JSON ({err}): {}", String::from_utf8_lossy(&output.stdout))
    })
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_json(dir: &Path, name: &str, value: &Value) -> String {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec(value).expect("serialize")).expect("write json");
    path.to_string_lossy().into_owned()
}

fn desktop_table_screen() -> Value {
    json!({
        "viewportProfile": { "platform": "Desktop", "widthPx": 1440, "heightPx": 900 },
        "components": [
            { "id": "nav", "type": "sidenav" },
            { "id": "users", "type": "DataTable" },
            { "id": "save", "type": "Button" }
        ]
    })
}

fn mobile_form_screen() -> Value {
    json!({
        "viewportProfile": { "platform": "mobile", "widthPx": 390, "heightPx": 844 },
        "components": [
            { "id": "name", "type": "input" },
            { "id": "email", "type": "TextField" },
            { "id": "save", "type": "Button" }
        ]
    })
}

fn rejected_screen() -> Value {
    json!({ "components": [{ "id": "hero", "type": "Carousel" }] })
}

fn write_sqlite_config(dir: &Path) -> String {
    let db_path = dir.join("specs.db");
    let config = format!(
        "[audit]\nenabled = false\n\n[store]\ntype = \"sqlite\"\npath = {:?}\n",
        db_path.to_string_lossy()
    );
    let config_path = dir.join("sqlite.toml");
    fs::write(&config_path, config).expect("write config");
    config_path.to_string_lossy().into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies `--version` prints the package version.
#[test]
fn version_flag_prints_version() {
    let dir = TempDir::new().unwrap();
    let output = run_meds(dir.path(), &["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("meds {}", env!("CARGO_PKG_VERSION")));
}

/// Verifies `normalize` emits the repaired document.
#[test]
fn normalize_emits_repaired_document() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let output = run_meds(dir.path(), &["normalize", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let document = stdout_json(&output);
    assert_eq!(document["viewportProfile"]["platform"], json!("desktop"));
    assert_eq!(document["components"][1]["type"], json!("Table"));
    assert!(document.get("foundations").is_some());
}

/// Verifies `validate` prints the filled spec for acceptable input.
#[test]
fn validate_accepts_repairable_document() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let output = run_meds(dir.path(), &["validate", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let spec = stdout_json(&output);
    assert_eq!(spec["version"], json!("1.0"));
    assert_eq!(spec["components"].as_array().map(Vec::len), Some(3));
}

/// Verifies `validate` lists violations and exits non-zero.
#[test]
fn validate_rejects_unknown_component_type() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &rejected_screen());
    let output = run_meds(dir.path(), &["validate", "--input", &input]);
    assert!(!output.status.success());
    let violations = stdout_json(&output);
    assert_eq!(violations[0]["path"], json!("/components/0/type"));
    let stderr = stderr_text(&output);
    assert!(stderr.contains("rejected with 1 violation"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("/components/0/type"), "unexpected stderr: {stderr}");
}

/// Verifies `context` derives features from the validated spec.
#[test]
fn context_reports_table_content() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let output = run_meds(dir.path(), &["context", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let context = stdout_json(&output);
    assert_eq!(context["contentType"], json!("table"));
    assert_eq!(context["keepContext"], json!(true));
    assert_eq!(context["deviceHasTouch"], json!(false));
}

/// Verifies `evaluate` follows the viewport's policy by default.
#[test]
fn evaluate_uses_viewport_policy() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &mobile_form_screen());
    let output = run_meds(dir.path(), &["evaluate", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let evaluation = stdout_json(&output);
    assert_eq!(evaluation["policyMeta"]["policyId"], json!("ux-mobile-v1"));
    assert_eq!(evaluation["policyMeta"]["platform"], json!("mobile"));
}

/// Verifies `--platform` overrides the viewport's policy.
#[test]
fn evaluate_platform_flag_overrides_viewport() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &mobile_form_screen());
    let output = run_meds(dir.path(), &["evaluate", "--input", &input, "--platform", "desktop"]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let evaluation = stdout_json(&output);
    assert_eq!(evaluation["policyMeta"]["policyId"], json!("ux-desktop-v1"));
}

/// Verifies `evaluate` accepts a custom rulebook file.
#[test]
fn evaluate_with_custom_rulebook() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let rulebook = write_json(
        dir.path(),
        "rulebook.json",
        &json!({
            "version": "test-1",
            "policies": [{
                "policyId": "only-desktop",
                "platform": "desktop",
                "rules": [{ "id": "r1", "family": "Menus", "event": "hover", "action": "tooltip" }]
            }]
        }),
    );
    let output = run_meds(dir.path(), &["evaluate", "--input", &input, "--rulebook", &rulebook]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let evaluation = stdout_json(&output);
    assert_eq!(evaluation["policyMeta"]["policyId"], json!("only-desktop"));
    assert_eq!(evaluation["policyMeta"]["rulebookVersion"], json!("test-1"));
    assert_eq!(evaluation["decisions"].as_array().map(Vec::len), Some(1));
}

/// Verifies `process` prints the content-addressed pipeline output.
#[test]
fn process_prints_pipeline_output() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let output = run_meds(dir.path(), &["process", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let result = stdout_json(&output);
    let spec_id = result["specId"].as_str().expect("specId");
    assert!(spec_id.starts_with("meds_"));
    assert!(result["spec"]["patterns"].is_object());
    assert_eq!(result["evaluation"]["policyMeta"]["policyId"], json!("ux-desktop-v1"));
    assert!(stderr_text(&output).contains("meds_pipeline"));
}

/// Verifies identical input yields byte-identical output.
#[test]
fn process_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let first = run_meds(dir.path(), &["process", "--input", &input]);
    let second = run_meds(dir.path(), &["process", "--input", &input]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

/// Verifies `process --output` writes the result to a file.
#[test]
fn process_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let out_path = dir.path().join("spec.json");
    let output = run_meds(
        dir.path(),
        &["process", "--input", &input, "--output", out_path.to_string_lossy().as_ref()],
    );
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let written: Value = serde_json::from_slice(&fs::read(&out_path).unwrap()).unwrap();
    let spec_id = written["specId"].as_str().expect("specId");
    assert!(String::from_utf8_lossy(&output.stdout).contains(spec_id));
}

/// Verifies `process` exits non-zero on rejected input.
#[test]
fn process_rejects_invalid_document() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &rejected_screen());
    let output = run_meds(dir.path(), &["process", "--input", &input]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr_text(&output).contains("/components/0/type"));
}

/// Verifies `process --persist` stores the spec and `show` loads it back.
#[test]
fn process_persist_then_show_roundtrips() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let config = write_sqlite_config(dir.path());

    let processed = run_meds(dir.path(), &["process", "--input", &input, "--config", &config, "--persist"]);
    assert!(processed.status.success(), "stderr: {}", stderr_text(&processed));
    let result = stdout_json(&processed);
    let spec_id = result["specId"].as_str().expect("specId").to_string();
    assert!(stderr_text(&processed).contains("persisted"));

    let shown = run_meds(dir.path(), &["show", "--id", &spec_id, "--config", &config]);
    assert!(shown.status.success(), "stderr: {}", stderr_text(&shown));
    assert_eq!(stdout_json(&shown), result["spec"]);
}

/// Verifies `show` reports unknown ids.
#[test]
fn show_reports_missing_spec() {
    let dir = TempDir::new().unwrap();
    let config = write_sqlite_config(dir.path());
    let output = run_meds(dir.path(), &["show", "--id", "meds_missing", "--config", &config]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("No persisted spec"));
}

/// Verifies `show` requires a sqlite store.
#[test]
fn show_requires_sqlite_store() {
    let dir = TempDir::new().unwrap();
    let output = run_meds(dir.path(), &["show", "--id", "meds_abc"]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("store.type"));
}

/// Verifies the built-in rulebook prints and re-validates.
#[test]
fn rulebook_show_output_validates() {
    let dir = TempDir::new().unwrap();
    let shown = run_meds(dir.path(), &["rulebook", "show"]);
    assert!(shown.status.success(), "stderr: {}", stderr_text(&shown));
    let rulebook = stdout_json(&shown);
    assert_eq!(rulebook["version"], json!("2024.1"));

    let path = write_json(dir.path(), "rulebook.json", &rulebook);
    let validated = run_meds(dir.path(), &["rulebook", "validate", "--input", &path]);
    assert!(validated.status.success(), "stderr: {}", stderr_text(&validated));
    let stdout = String::from_utf8_lossy(&validated.stdout);
    assert!(stdout.contains("Rulebook valid (version=2024.1, policies=2"), "unexpected stdout: {stdout}");
}

/// Verifies rulebooks with duplicate rule ids are rejected.
#[test]
fn rulebook_validate_rejects_duplicate_rule_ids() {
    let dir = TempDir::new().unwrap();
    let rule = json!({ "id": "dup", "family": "Menus", "event": "hover", "action": "tooltip" });
    let path = write_json(
        dir.path(),
        "rulebook.json",
        &json!({
            "version": "bad",
            "policies": [{ "policyId": "p", "platform": "desktop", "rules": [rule.clone(), rule] }]
        }),
    );
    let output = run_meds(dir.path(), &["rulebook", "validate", "--input", &path]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Failed to load rulebook"));
}

/// Verifies `config validate` accepts a valid file.
#[test]
fn config_validate_accepts_valid_file() {
    let dir = TempDir::new().unwrap();
    let config = write_sqlite_config(dir.path());
    let output = run_meds(dir.path(), &["config", "validate", "--config", &config]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Config valid.");
}

/// Verifies `config validate` rejects unknown sections.
#[test]
fn config_validate_rejects_unknown_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[server]\nbind = \"0.0.0.0:80\"\n").unwrap();
    let output = run_meds(dir.path(), &["config", "validate", "--config", path.to_string_lossy().as_ref()]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Failed to load config"));
}

/// Verifies implicit `meds.toml` discovery in the working directory.
#[test]
fn process_discovers_implicit_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("meds.toml"), "[evaluation]\nplatform_override = \"mobile\"\n").unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let output = run_meds(dir.path(), &["process", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    let result = stdout_json(&output);
    assert_eq!(result["evaluation"]["policyMeta"]["policyId"], json!("ux-mobile-v1"));
}

/// Verifies both published schemas print as JSON.
#[test]
fn schema_commands_print_json() {
    let dir = TempDir::new().unwrap();
    let spec = run_meds(dir.path(), &["schema", "spec"]);
    assert!(spec.status.success());
    assert!(stdout_json(&spec)["$schema"].is_string());

    let config = run_meds(dir.path(), &["schema", "config"]);
    assert!(config.status.success());
    assert_eq!(stdout_json(&config)["$id"], json!("meds://schemas/config.schema.json"));
}

/// Verifies inputs over the configured limit are refused before parsing.
#[test]
fn process_refuses_oversized_input() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("meds.toml"), "[input]\nmax_bytes = 64\n").unwrap();
    let input = write_json(dir.path(), "raw.json", &desktop_table_screen());
    let output = run_meds(dir.path(), &["process", "--input", &input]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Refusing to read"));
}

/// Verifies malformed JSON is reported with the input path.
#[test]
fn normalize_reports_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("raw.json");
    fs::write(&path, "{ not json").unwrap();
    let output = run_meds(dir.path(), &["normalize", "--input", path.to_string_lossy().as_ref()]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Failed to parse design document JSON"));
}
