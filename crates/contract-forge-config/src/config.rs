// crates/contract-forge-config/src/config.rs
// ============================================================================
// Module: Contract Forge Configuration
// Description: Configuration loading and validation for Contract Forge.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: contract-forge-core, contract-forge-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, the `CONTRACT_FORGE_CONFIG` environment
//! variable, or the default file name, in that order. Invalid configuration
//! fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use contract_forge_core::DateStyle;
use contract_forge_core::EngineConfig;
use contract_forge_core::is_valid_email;
use contract_forge_store_sqlite::SqliteStoreConfig;
use contract_forge_store_sqlite::SqliteStoreMode;
use contract_forge_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "contract-forge.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CONTRACT_FORGE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for `server.max_body_bytes`.
pub(crate) const MAX_BODY_BYTES_LIMIT: usize = 16 * 1024 * 1024;
/// Upper bound for `documents.max_issued_at_skew_ms` (seven days).
pub(crate) const MAX_ISSUED_AT_SKEW_LIMIT_MS: u64 = 7 * 24 * 60 * 60 * 1000;
/// Minimum outbound request timeout in milliseconds.
pub(crate) const MIN_OUTBOUND_TIMEOUT_MS: u64 = 100;
/// Maximum outbound request timeout in milliseconds.
pub(crate) const MAX_OUTBOUND_TIMEOUT_MS: u64 = 60_000;
/// Maximum length of an environment variable name.
pub(crate) const MAX_ENV_VAR_NAME_LENGTH: usize = 128;
/// Maximum length of a grammar language code.
pub(crate) const MAX_LANGUAGE_LENGTH: usize = 16;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root configuration for Contract Forge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractForgeConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Contract store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Document rendering settings.
    #[serde(default)]
    pub documents: DocumentsConfig,
    /// Outbound email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Grammar checking settings.
    #[serde(default)]
    pub grammar: GrammarConfig,
    /// Audit logging settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl ContractForgeConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.store.validate()?;
        self.documents.validate()?;
        self.email.validate()?;
        self.grammar.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the resolution engine configuration.
    #[must_use]
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            date_style: self.documents.date_style,
        }
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the bind address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.trim().parse().map_err(|_| {
            ConfigError::Invalid(format!("server.bind is not a socket address: {}", self.bind))
        })
    }

    /// Validates server configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_BODY_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be at most {MAX_BODY_BYTES_LIMIT}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Contract store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store backend type.
    #[serde(rename = "type", default)]
    pub store_type: StoreType,
    /// `SQLite` database path when using the sqlite backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_store_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` synchronous mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::default(),
            path: None,
            busy_timeout_ms: default_store_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreConfig {
    /// Returns the `SQLite` store configuration for the sqlite backend.
    #[must_use]
    pub fn sqlite_config(&self) -> Option<SqliteStoreConfig> {
        match self.store_type {
            StoreType::Memory => None,
            StoreType::Sqlite => self.path.as_ref().map(|path| SqliteStoreConfig {
                path: path.clone(),
                busy_timeout_ms: self.busy_timeout_ms,
                journal_mode: self.journal_mode,
                sync_mode: self.sync_mode,
            }),
        }
    }

    /// Validates contract store configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match self.store_type {
            StoreType::Memory => {
                if self.path.is_some() {
                    return Err(ConfigError::Invalid(
                        "memory store must not set path".to_string(),
                    ));
                }
                Ok(())
            }
            StoreType::Sqlite => {
                let path = self.path.as_ref().ok_or_else(|| {
                    ConfigError::Invalid("sqlite store requires path".to_string())
                })?;
                validate_store_path(path)?;
                if self.busy_timeout_ms == 0 {
                    return Err(ConfigError::Invalid(
                        "store.busy_timeout_ms must be greater than zero".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Contract store backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// Use the in-memory store.
    #[default]
    Memory,
    /// Use the `SQLite`-backed durable store.
    Sqlite,
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Document rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    /// Style of the `[DATE]` stamp.
    #[serde(default)]
    pub date_style: DateStyle,
    /// Maximum distance between a client-echoed `issuedAt` and now.
    #[serde(default = "default_max_issued_at_skew_ms")]
    pub max_issued_at_skew_ms: u64,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            date_style: DateStyle::default(),
            max_issued_at_skew_ms: default_max_issued_at_skew_ms(),
        }
    }
}

impl DocumentsConfig {
    /// Validates document configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_issued_at_skew_ms > MAX_ISSUED_AT_SKEW_LIMIT_MS {
            return Err(ConfigError::Invalid(format!(
                "documents.max_issued_at_skew_ms must be at most {MAX_ISSUED_AT_SKEW_LIMIT_MS}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Email
// ============================================================================

/// Outbound email provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmailProvider {
    /// Email delivery is turned off; sends report not configured.
    #[default]
    Disabled,
    /// `SendGrid` v3 mail send API.
    Sendgrid,
}

/// Outbound email configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Email provider.
    #[serde(default)]
    pub provider: EmailProvider,
    /// Environment variable holding the provider API key.
    #[serde(default = "default_email_api_key_env")]
    pub api_key_env: String,
    /// Sender address.
    #[serde(default = "default_email_from_address")]
    pub from_address: String,
    /// Provider endpoint URL.
    #[serde(default = "default_email_endpoint")]
    pub endpoint: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_email_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            api_key_env: default_email_api_key_env(),
            from_address: default_email_from_address(),
            endpoint: default_email_endpoint(),
            timeout_ms: default_email_timeout_ms(),
        }
    }
}

impl EmailConfig {
    /// Reads the API key from the configured environment variable.
    ///
    /// Returns `None` when the variable is unset or blank.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env).ok().filter(|value| !value.trim().is_empty())
    }

    /// Validates email configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_env_var_name("email.api_key_env", &self.api_key_env)?;
        if !is_valid_email(self.from_address.trim()) {
            return Err(ConfigError::Invalid(
                "email.from_address must be a valid email address".to_string(),
            ));
        }
        validate_endpoint("email.endpoint", &self.endpoint)?;
        validate_timeout("email.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Grammar
// ============================================================================

/// Grammar checking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GrammarMode {
    /// Builtin heuristic checker.
    #[default]
    Builtin,
    /// Remote `LanguageTool` HTTP service.
    LanguageTool,
    /// No checking; always returns no suggestions.
    Disabled,
}

/// Grammar checking configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GrammarConfig {
    /// Checker selection.
    #[serde(default)]
    pub mode: GrammarMode,
    /// `LanguageTool` check endpoint.
    #[serde(default = "default_grammar_endpoint")]
    pub endpoint: String,
    /// Language code sent to the remote checker.
    #[serde(default = "default_grammar_language")]
    pub language: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_grammar_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            mode: GrammarMode::default(),
            endpoint: default_grammar_endpoint(),
            language: default_grammar_language(),
            timeout_ms: default_grammar_timeout_ms(),
        }
    }
}

impl GrammarConfig {
    /// Validates grammar configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let language = self.language.trim();
        if language.is_empty() || language.len() > MAX_LANGUAGE_LENGTH {
            return Err(ConfigError::Invalid(
                "grammar.language must be a short language code".to_string(),
            ));
        }
        if !language.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
            return Err(ConfigError::Invalid(
                "grammar.language must contain only letters, digits, and dashes".to_string(),
            ));
        }
        if self.mode == GrammarMode::LanguageTool {
            validate_endpoint("grammar.endpoint", &self.endpoint)?;
        }
        validate_timeout("grammar.timeout_ms", self.timeout_ms)
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkType {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard audit events.
    None,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkType,
    /// Audit log path for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkType::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkType::File, None) => {
                Err(ConfigError::Invalid("file audit sink requires audit.path".to_string()))
            }
            (AuditSinkType::Stderr | AuditSinkType::None, Some(_)) => Err(ConfigError::Invalid(
                "audit.path is only valid with the file sink".to_string(),
            )),
            (AuditSinkType::Stderr | AuditSinkType::None, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading config.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates the sqlite store path.
fn validate_store_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.trim().is_empty() {
        return Err(ConfigError::Invalid("store path must be non-empty".to_string()));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("store path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("store path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates an outbound endpoint URL.
fn validate_endpoint(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    let Some(rest) = trimmed.strip_prefix("https://").or_else(|| trimmed.strip_prefix("http://"))
    else {
        return Err(ConfigError::Invalid(format!("{field} must include http:// or https://")));
    };
    if rest.is_empty() || rest.starts_with('/') {
        return Err(ConfigError::Invalid(format!("{field} must include a host")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates an outbound timeout.
fn validate_timeout(field: &str, value: u64) -> Result<(), ConfigError> {
    if !(MIN_OUTBOUND_TIMEOUT_MS ..= MAX_OUTBOUND_TIMEOUT_MS).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between {MIN_OUTBOUND_TIMEOUT_MS} and {MAX_OUTBOUND_TIMEOUT_MS}"
        )));
    }
    Ok(())
}

/// Validates an environment variable name.
fn validate_env_var_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.len() > MAX_ENV_VAR_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} must be a non-empty variable name")));
    }
    if value.starts_with(|ch: char| ch.is_ascii_digit())
        || !value.chars().all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_')
    {
        return Err(ConfigError::Invalid(format!(
            "{field} must contain only A-Z, 0-9, and underscores"
        )));
    }
    Ok(())
}

/// Default bind address.
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Default maximum request body size in bytes.
pub(crate) const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Default `SQLite` busy timeout in milliseconds.
const fn default_store_busy_timeout_ms() -> u64 {
    5_000
}

/// Default issued-at skew bound (one day).
const fn default_max_issued_at_skew_ms() -> u64 {
    24 * 60 * 60 * 1000
}

/// Default API key variable.
fn default_email_api_key_env() -> String {
    "SENDGRID_API_KEY".to_string()
}

/// Default sender address.
fn default_email_from_address() -> String {
    "noreply@contractgen.com".to_string()
}

/// Default `SendGrid` endpoint.
fn default_email_endpoint() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_string()
}

/// Default email timeout.
const fn default_email_timeout_ms() -> u64 {
    10_000
}

/// Default `LanguageTool` endpoint.
fn default_grammar_endpoint() -> String {
    "https://api.languagetool.org/v2/check".to_string()
}

/// Default grammar language.
fn default_grammar_language() -> String {
    "en-US".to_string()
}

/// Default grammar timeout.
const fn default_grammar_timeout_ms() -> u64 {
    5_000
}

// ============================================================================
// SECTION: Tests
// ============================================================================
