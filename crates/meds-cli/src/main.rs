// crates/meds-cli/src/main.rs
// ============================================================================
// Module: MEDS CLI Entry Point
// Description: Command dispatcher for the MEDS design spec pipeline.
// Purpose: Run pipeline stages over files and inspect rulebooks, configs, and schemas.
// Dependencies: clap, meds-config, meds-core, meds-store-sqlite, serde, thiserror.
// ============================================================================

//! ## Overview
//! The `meds` binary runs individual pipeline stages or the full pipeline
//! over raw AI documents on disk, loads persisted specs, and prints the
//! published JSON schemas. All user-facing strings are routed through the
//! i18n catalog. Inputs are untrusted: every file is read with a hard byte
//! limit before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use meds_cli::t;
use meds_config::MedsConfig;
use meds_core::DEFAULT_MAX_INPUT_BYTES;
use meds_core::FileAuditSink;
use meds_core::InMemorySpecStore;
use meds_core::NoopAuditSink;
use meds_core::PipelineAuditSink;
use meds_core::PipelineError;
use meds_core::PolicyPlatform;
use meds_core::Rulebook;
use meds_core::SpecId;
use meds_core::SpecPipeline;
use meds_core::SpecStore;
use meds_core::SpecViolation;
use meds_core::StderrAuditSink;
use meds_core::canonical_json_bytes;
use meds_core::derive_context;
use meds_core::design_spec_schema;
use meds_core::evaluate;
use meds_core::normalize;
use meds_core::validate_and_fill;
use meds_store_sqlite::SqliteSpecStore;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a rulebook JSON input.
const MAX_RULEBOOK_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "meds", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize a raw AI document.
    Normalize(InputCommand),
    /// Normalize and validate a raw AI document.
    Validate(InputCommand),
    /// Derive the UX context of a raw AI document.
    Context(InputCommand),
    /// Evaluate the UX rulebook against a raw AI document.
    Evaluate(EvaluateCommand),
    /// Run the full pipeline over a raw AI document.
    Process(ProcessCommand),
    /// Load a persisted spec by id.
    Show(ShowCommand),
    /// Rulebook utilities.
    Rulebook {
        /// Selected rulebook subcommand.
        #[command(subcommand)]
        command: RulebookCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Print a published JSON schema.
    Schema {
        /// Schema to print.
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

/// Arguments shared by single-stage commands.
#[derive(Args, Debug)]
struct InputCommand {
    /// Path to the raw AI document (JSON).
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
}

/// Arguments for `evaluate`.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Path to the raw AI document (JSON).
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Policy platform to evaluate against (defaults to the viewport's).
    #[arg(long, value_enum)]
    platform: Option<PlatformArg>,
    /// Rulebook JSON path (defaults to the built-in rulebook).
    #[arg(long, value_name = "PATH")]
    rulebook: Option<PathBuf>,
}

/// Arguments for `process`.
#[derive(Args, Debug)]
struct ProcessCommand {
    /// Path to the raw AI document (JSON).
    #[arg(long, value_name = "PATH")]
    input: PathBuf,
    /// Optional config file path (defaults to meds.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output path for the pipeline result (defaults to stdout).
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Save the integrated spec through the configured store.
    #[arg(long, action = ArgAction::SetTrue)]
    persist: bool,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
struct ShowCommand {
    /// Content-derived spec identifier.
    #[arg(long, value_name = "SPEC_ID")]
    id: String,
    /// Optional config file path (defaults to meds.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Rulebook subcommands.
#[derive(Subcommand, Debug)]
enum RulebookCommand {
    /// Validate a rulebook document.
    Validate(InputCommand),
    /// Print the built-in rulebook.
    Show,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a MEDS configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to meds.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Policy platform selection.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum PlatformArg {
    /// Desktop policy.
    Desktop,
    /// Mobile policy.
    Mobile,
}

impl From<PlatformArg> for PolicyPlatform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Desktop => Self::Desktop,
            PlatformArg::Mobile => Self::Mobile,
        }
    }
}

/// Published schemas.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum SchemaKind {
    /// MEDS design spec schema.
    Spec,
    /// `meds.toml` schema.
    Config,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Normalize(command) => command_normalize(&command),
        Commands::Validate(command) => command_validate(&command),
        Commands::Context(command) => command_context(&command),
        Commands::Evaluate(command) => command_evaluate(&command),
        Commands::Process(command) => command_process(&command),
        Commands::Show(command) => command_show(&command),
        Commands::Rulebook {
            command,
        } => command_rulebook(command),
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Schema {
            kind,
        } => command_schema(kind),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Stage Commands
// ============================================================================

/// Executes the `normalize` command.
fn command_normalize(command: &InputCommand) -> CliResult<ExitCode> {
    let raw = read_document(&command.input, DEFAULT_MAX_INPUT_BYTES)?;
    write_json(&normalize(&raw), &t!("input.kind.document"))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `validate` command.
fn command_validate(command: &InputCommand) -> CliResult<ExitCode> {
    let raw = read_document(&command.input, DEFAULT_MAX_INPUT_BYTES)?;
    match validate_and_fill(&normalize(&raw)) {
        Ok(spec) => {
            write_json(&spec, &t!("input.kind.spec"))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(violations) => {
            write_json(&violations, &t!("input.kind.spec"))?;
            report_violations(&violations)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `context` command.
fn command_context(command: &InputCommand) -> CliResult<ExitCode> {
    let raw = read_document(&command.input, DEFAULT_MAX_INPUT_BYTES)?;
    let spec = match validate_and_fill(&normalize(&raw)) {
        Ok(spec) => spec,
        Err(violations) => {
            report_violations(&violations)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    write_json(&derive_context(&spec), &t!("input.kind.context"))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `evaluate` command.
fn command_evaluate(command: &EvaluateCommand) -> CliResult<ExitCode> {
    let rulebook = load_rulebook(command.rulebook.as_deref())?;
    let raw = read_document(&command.input, DEFAULT_MAX_INPUT_BYTES)?;
    let spec = match validate_and_fill(&normalize(&raw)) {
        Ok(spec) => spec,
        Err(violations) => {
            report_violations(&violations)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let context = derive_context(&spec);
    let platform = command
        .platform
        .map_or_else(|| spec.viewport_profile.platform.policy_platform(), PolicyPlatform::from);
    write_json(&evaluate(&rulebook, &context, platform), &t!("input.kind.evaluation"))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Pipeline Commands
// ============================================================================

/// Executes the `process` command.
fn command_process(command: &ProcessCommand) -> CliResult<ExitCode> {
    let config = MedsConfig::load_or_default(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let rulebook = load_rulebook(config.rulebook.path.as_deref().map(Path::new))?;
    let mut pipeline = SpecPipeline::new(Arc::new(rulebook))
        .with_audit(build_audit_sink(&config)?)
        .with_max_input_bytes(config.input.max_bytes)
        .with_platform_override(config.evaluation.platform_override);
    if command.persist {
        pipeline = pipeline.with_store(build_store(&config)?);
    }

    let raw = read_input_bytes(&command.input, &t!("input.kind.document"), config.input.max_bytes)?;
    let output = match pipeline.run(&raw) {
        Ok(output) => output,
        Err(PipelineError::Rejected(violations)) => {
            report_violations(&violations)?;
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(CliError::new(t!("process.failed", error = err))),
    };

    if let Some(path) = &command.output {
        let mut bytes = serialize_json(&output, &t!("input.kind.spec"))?;
        bytes.push(b'\n');
        fs::write(path, bytes).map_err(|err| {
            CliError::new(t!(
                "output.file_write_failed",
                kind = t!("input.kind.spec"),
                path = path.display(),
                error = err
            ))
        })?;
        write_stdout_line(&t!("process.written", spec_id = output.spec_id, path = path.display()))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    } else {
        write_json(&output, &t!("input.kind.spec"))?;
    }
    if command.persist {
        write_stderr_line(&t!("process.persisted", spec_id = output.spec_id))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the `show` command.
fn command_show(command: &ShowCommand) -> CliResult<ExitCode> {
    let config = MedsConfig::load_or_default(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let sqlite = config
        .store
        .sqlite_config()
        .ok_or_else(|| CliError::new(t!("store.sqlite_required")))?;
    let store = SqliteSpecStore::new(sqlite)
        .map_err(|err| CliError::new(t!("store.open_failed", error = err)))?;
    let spec_id = SpecId::new(command.id.as_str());
    let spec = store
        .load(&spec_id)
        .map_err(|err| CliError::new(t!("store.load_failed", spec_id = spec_id, error = err)))?
        .ok_or_else(|| CliError::new(t!("store.not_found", spec_id = spec_id)))?;
    write_json(&spec, &t!("input.kind.spec"))?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the audit sink selected by the config.
fn build_audit_sink(config: &MedsConfig) -> CliResult<Arc<dyn PipelineAuditSink>> {
    if !config.audit.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.audit.path {
        Some(path) => {
            let sink = FileAuditSink::new(Path::new(path)).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path, error = err))
            })?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

/// Builds the spec store selected by the config.
fn build_store(config: &MedsConfig) -> CliResult<Arc<dyn SpecStore>> {
    match config.store.sqlite_config() {
        Some(sqlite) => {
            let store = SqliteSpecStore::new(sqlite)
                .map_err(|err| CliError::new(t!("store.open_failed", error = err)))?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(InMemorySpecStore::new())),
    }
}

// ============================================================================
// SECTION: Rulebook, Config, and Schema Commands
// ============================================================================

/// Dispatches rulebook subcommands.
fn command_rulebook(command: RulebookCommand) -> CliResult<ExitCode> {
    match command {
        RulebookCommand::Validate(command) => command_rulebook_validate(&command),
        RulebookCommand::Show => {
            let rulebook = load_rulebook(None)?;
            write_json(&rulebook, &t!("input.kind.rulebook"))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the rulebook validation command.
fn command_rulebook_validate(command: &InputCommand) -> CliResult<ExitCode> {
    let rulebook = load_rulebook(Some(&command.input))?;
    write_stdout_line(&t!(
        "rulebook.validate.ok",
        version = rulebook.version,
        policies = rulebook.policies.len(),
        rules = rulebook.rule_count()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = MedsConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `schema` command.
fn command_schema(kind: SchemaKind) -> CliResult<ExitCode> {
    let schema = match kind {
        SchemaKind::Spec => design_spec_schema(),
        SchemaKind::Config => meds_config::config_schema(),
    };
    write_json(&schema, &t!("input.kind.schema"))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads an input file with a byte limit, mapping failures to CLI errors.
fn read_input_bytes(path: &Path, kind: &str, max_bytes: usize) -> CliResult<Vec<u8>> {
    read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(error) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = error))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })
}

/// Reads and parses a raw AI document.
fn read_document(path: &Path, max_bytes: usize) -> CliResult<Value> {
    let kind = t!("input.kind.document");
    let bytes = read_input_bytes(path, &kind, max_bytes)?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

/// Loads the rulebook at `path`, or the built-in rulebook.
fn load_rulebook(path: Option<&Path>) -> CliResult<Rulebook> {
    let Some(path) = path else {
        return Rulebook::builtin()
            .map_err(|err| CliError::new(t!("rulebook.load_failed", error = err)));
    };
    let bytes = read_input_bytes(path, &t!("input.kind.rulebook"), MAX_RULEBOOK_BYTES)?;
    Rulebook::from_json_slice(&bytes)
        .map_err(|err| CliError::new(t!("rulebook.load_failed", error = err)))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Serializes a value to canonical JSON.
fn serialize_json<T: Serialize>(value: &T, kind: &str) -> CliResult<Vec<u8>> {
    canonical_json_bytes(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", kind = kind, error = err)))
}

/// Writes a value to stdout as canonical JSON followed by a newline.
fn write_json<T: Serialize>(value: &T, kind: &str) -> CliResult<()> {
    let mut bytes = serialize_json(value, kind)?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes the violation summary and one line per violation to stderr.
fn report_violations(violations: &[SpecViolation]) -> CliResult<()> {
    write_stderr_line(&t!("validate.rejected", count = violations.len()))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    for violation in violations {
        write_stderr_line(&t!(
            "validate.violation",
            path = violation.path,
            message = violation.message
        ))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(())
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
