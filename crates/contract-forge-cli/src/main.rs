// crates/contract-forge-cli/src/main.rs
// ============================================================================
// Module: Contract Forge CLI Entry Point
// Description: Command dispatcher for the server and offline document tasks.
// Purpose: Run the HTTP service and generate documents from the shell.
// Dependencies: clap, contract-forge-config, contract-forge-core,
//               contract-forge-server, serde, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! The Contract Forge CLI starts the HTTP service and exposes the catalog,
//! generation, export, and grammar operations for local use. Answer and text
//! files are untrusted input and are read under hard size limits.

// ============================================================================
// SECTION: Modules
// ============================================================================


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

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use contract_forge_config::ContractForgeConfig;
use contract_forge_config::config_toml_example;
use contract_forge_core::ContractService;
use contract_forge_core::ContractTypeId;
use contract_forge_core::ContractTypeSummary;
use contract_forge_core::EngineConfig;
use contract_forge_core::ExportFormat;
use contract_forge_core::ExportRequest;
use contract_forge_core::FormAnswers;
use contract_forge_core::GenerateRequest;
use contract_forge_core::InMemoryContractStore;
use contract_forge_core::ServiceError;
use contract_forge_core::SharedContractStore;
use contract_forge_core::TemplateRegistry;
use contract_forge_core::Timestamp;
use contract_forge_server::AppState;
use contract_forge_server::ContractForgeServer;
use contract_forge_server::build_grammar;
use contract_forge_server::startup_warnings;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a form answers file.
const MAX_ANSWERS_BYTES: usize = 256 * 1024;
/// Maximum size of a grammar check input file.
const MAX_GRAMMAR_TEXT_BYTES: usize = 256 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "contract-forge", disable_help_subcommand = true, disable_version_flag = true)]
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
    /// Start the HTTP service.
    Serve(ServeCommand),
    /// Contract type catalog utilities.
    Types {
        /// Selected types subcommand.
        #[command(subcommand)]
        command: TypesCommand,
    },
    /// Generate a document from a JSON answers file.
    Generate(GenerateCommand),
    /// Grammar suggestion utilities.
    Grammar {
        /// Selected grammar subcommand.
        #[command(subcommand)]
        command: GrammarCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Template registry utilities.
    Registry {
        /// Selected registry subcommand.
        #[command(subcommand)]
        command: RegistryCommand,
    },
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Config file path (defaults to `CONTRACT_FORGE_CONFIG` or
    /// `contract-forge.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
enum TypesCommand {
    /// List available contract types.
    List(TypesListCommand),
    /// Print one contract type definition as JSON.
    Show(TypesShowCommand),
}

/// Arguments for `types list`.
#[derive(Args, Debug)]
struct TypesListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormatArg::Text)]
    format: OutputFormatArg,
}

/// Arguments for `types show`.
#[derive(Args, Debug)]
struct TypesShowCommand {
    /// Contract type identifier.
    #[arg(value_name = "TYPE")]
    id: String,
}

/// Arguments for `generate`.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Contract type identifier.
    #[arg(long = "type", value_name = "TYPE")]
    contract_type: String,
    /// JSON object of form answers.
    #[arg(long, value_name = "PATH")]
    answers: PathBuf,
    /// Output document format.
    #[arg(long, value_enum, default_value_t = DocumentFormatArg::Text)]
    format: DocumentFormatArg,
    /// Output file; stdout when omitted.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Calendar date stamped into the document (YYYY-MM-DD, UTC).
    #[arg(long, value_name = "DATE")]
    issued_at: Option<String>,
    /// Config file; an in-memory store with defaults is used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Grammar subcommands.
#[derive(Subcommand, Debug)]
enum GrammarCommand {
    /// Print suggestions for a UTF-8 text file.
    Check(GrammarCheckCommand),
}

/// Arguments for `grammar check`.
#[derive(Args, Debug)]
struct GrammarCheckCommand {
    /// Text file to check.
    #[arg(value_name = "PATH")]
    input: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormatArg::Text)]
    format: OutputFormatArg,
    /// Config file selecting the checker; builtin heuristics when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a config file.
    Validate(ConfigValidateCommand),
    /// Print an annotated example config.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Config file path (defaults to `CONTRACT_FORGE_CONFIG` or
    /// `contract-forge.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Registry subcommands.
#[derive(Subcommand, Debug)]
enum RegistryCommand {
    /// Check builtin definitions for structural defects.
    Verify,
}

/// Listing output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormatArg {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Document output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DocumentFormatArg {
    /// Plain UTF-8 text.
    Text,
    /// Paginated PDF.
    Pdf,
    /// Word-compatible document.
    Word,
}

impl DocumentFormatArg {
    /// Maps the argument onto the export format.
    const fn export_format(self) -> ExportFormat {
        match self {
            Self::Text => ExportFormat::Text,
            Self::Pdf => ExportFormat::Pdf,
            Self::Word => ExportFormat::Word,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
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
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("contract-forge {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Types {
            command,
        } => command_types(command),
        Commands::Generate(command) => command_generate(&command),
        Commands::Grammar {
            command,
        } => command_grammar(command).await,
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Registry {
            command,
        } => command_registry(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = ContractForgeConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let server = tokio::task::spawn_blocking(move || ContractForgeServer::from_config(config))
        .await
        .map_err(|err| CliError::new(format!("server init failed: init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Types Commands
// ============================================================================

/// Dispatches catalog subcommands.
fn command_types(command: TypesCommand) -> CliResult<ExitCode> {
    let registry = TemplateRegistry::builtin();
    match command {
        TypesCommand::List(command) => {
            let summaries = registry.list_types();
            let rendered = match command.format {
                OutputFormatArg::Text => render_type_listing(&summaries),
                OutputFormatArg::Json => to_pretty_json(&summaries)?,
            };
            write_stdout_line(&rendered)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        TypesCommand::Show(command) => {
            let definition =
                registry.definition(&command.id).map_err(|err| CliError::new(err.to_string()))?;
            write_stdout_line(&to_pretty_json(definition)?)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders catalog entries as aligned `id  title` rows.
fn render_type_listing(summaries: &[ContractTypeSummary]) -> String {
    let width = summaries.iter().map(|summary| summary.id.as_str().len()).max().unwrap_or(0);
    summaries
        .iter()
        .map(|summary| format!("{:<width$}  {}", summary.id.as_str(), summary.title))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes the `generate` command.
fn command_generate(command: &GenerateCommand) -> CliResult<ExitCode> {
    let answers = read_answers(&command.answers)?;
    let state = build_generate_state(command.config.as_deref())?;
    let now = state.now();
    let issued_at = match command.issued_at.as_deref() {
        Some(text) => parse_issued_at(text)?,
        None => now,
    };
    let request = GenerateRequest {
        contract_type: ContractTypeId::new(command.contract_type.as_str()),
        answers,
        issued_at,
    };
    let contract = state
        .service
        .generate(request, now)
        .map_err(|err| CliError::new(describe_service_error(&err)))?;
    let artifact = state
        .exporter
        .export(&ExportRequest {
            contract_id: &contract.id,
            content: &contract.content,
            format: command.format.export_format(),
            exported_at: now,
        })
        .map_err(|err| CliError::new(format!("export failed: {err}")))?;

    match &command.output {
        Some(path) => {
            fs::write(path, &artifact.bytes).map_err(|err| {
                CliError::new(format!("failed to write {}: {err}", path.display()))
            })?;
            write_stderr_line(&format!(
                "generated contract {} -> {} ({} bytes)",
                contract.id,
                path.display(),
                artifact.bytes.len()
            ))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        }
        None => {
            write_stdout_bytes(&artifact.bytes)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Reads and parses a form answers file.
fn read_answers(path: &Path) -> CliResult<FormAnswers> {
    let bytes = read_bytes_with_limit(path, MAX_ANSWERS_BYTES)
        .map_err(|err| CliError::new(read_error_message(path, &err)))?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(format!("invalid answers file {}: {err}", path.display()))
    })
}

/// Builds generation state from config, or an in-memory default.
fn build_generate_state(config: Option<&Path>) -> CliResult<AppState> {
    let Some(path) = config else {
        let service = ContractService::new(
            TemplateRegistry::builtin(),
            EngineConfig::default(),
            SharedContractStore::from_store(InMemoryContractStore::new()),
        );
        return Ok(AppState::new(service));
    };
    let config = ContractForgeConfig::load(Some(path))
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    AppState::from_config(&config).map_err(|err| CliError::new(err.to_string()))
}

/// Parses a `YYYY-MM-DD` date into a UTC midnight timestamp.
fn parse_issued_at(text: &str) -> CliResult<Timestamp> {
    Timestamp::from_calendar_date(text)
        .map_err(|err| CliError::new(format!("invalid --issued-at '{text}': {err}")))
}

/// Formats a service error, listing each invalid field.
fn describe_service_error(error: &ServiceError) -> String {
    match error {
        ServiceError::Validation(validation) => {
            let mut message = String::from("invalid form answers:");
            for field in &validation.errors {
                message.push_str(&format!("\n  {}: {}", field.field_id, field.message));
            }
            message
        }
        other => other.to_string(),
    }
}

// ============================================================================
// SECTION: Grammar Command
// ============================================================================

/// Executes grammar subcommands.
async fn command_grammar(command: GrammarCommand) -> CliResult<ExitCode> {
    let GrammarCommand::Check(command) = command;
    let bytes = read_bytes_with_limit(&command.input, MAX_GRAMMAR_TEXT_BYTES)
        .map_err(|err| CliError::new(read_error_message(&command.input, &err)))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| CliError::new(format!("{} is not valid UTF-8", command.input.display())))?;
    if text.trim().is_empty() {
        return Err(CliError::new("text is required".to_string()));
    }
    let config = match command.config.as_deref() {
        Some(path) => ContractForgeConfig::load(Some(path))
            .map_err(|err| CliError::new(format!("failed to load config: {err}")))?,
        None => ContractForgeConfig::default(),
    };
    let checker = build_grammar(&config).map_err(|err| CliError::new(err.to_string()))?;
    let suggestions = match checker.check(&text).await {
        Ok(suggestions) => suggestions,
        Err(err) => {
            write_stderr_line(&format!("warning: {err}; no suggestions available"))
                .map_err(|err| CliError::new(output_error("stderr", &err)))?;
            Vec::new()
        }
    };
    let rendered = match command.format {
        OutputFormatArg::Json => to_pretty_json(&suggestions)?,
        OutputFormatArg::Text if suggestions.is_empty() => "no suggestions".to_string(),
        OutputFormatArg::Text => suggestions
            .iter()
            .map(|suggestion| {
                let mut line = format!(
                    "{}:{} [{}] {}",
                    suggestion.offset, suggestion.length, suggestion.rule, suggestion.message
                );
                if !suggestion.replacements.is_empty() {
                    line.push_str(" -> ");
                    line.push_str(&suggestion.replacements.join(" | "));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => {
            write_stdout_line(config_toml_example().trim_end())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the `config validate` command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = ContractForgeConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config invalid: {err}")))?;
    let bind = config
        .server
        .bind_addr()
        .map_err(|err| CliError::new(format!("config invalid: {err}")))?;
    for warning in startup_warnings(&config, bind) {
        write_stderr_line(&format!("warning: {warning}"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Registry Commands
// ============================================================================

/// Executes registry subcommands.
fn command_registry(command: RegistryCommand) -> CliResult<ExitCode> {
    let RegistryCommand::Verify = command;
    let registry = TemplateRegistry::builtin();
    let defects = registry.verify();
    if defects.is_empty() {
        let count = registry.list_types().len();
        write_stdout_line(&format!("registry ok: {count} contract types"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    for defect in &defects {
        write_stderr_line(&format!("defect: {defect}"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(ExitCode::FAILURE)
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

    let read_limit = limit.saturating_add(1);
    let mut limited = file.take(read_limit);
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

/// Formats a bounded read failure.
fn read_error_message(path: &Path, error: &ReadLimitError) -> String {
    match error {
        ReadLimitError::Io(err) => format!("failed to read {}: {err}", path.display()),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => format!("{} is too large ({size} bytes, limit {limit})", path.display()),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Serializes a value as pretty JSON.
fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
