// crates/contract-forge-server/src/state.rs
// ============================================================================
// Module: Application State
// Description: Shared collaborators for HTTP handlers.
// Purpose: Assemble the service, exporters, providers, and sinks from config.
// Dependencies: contract-forge-{config, core, export, providers, store-sqlite}
// ============================================================================

//! ## Overview
//! [`AppState`] bundles every collaborator a handler needs behind `Arc`
//! trait objects, so tests can swap any of them. [`AppState::from_config`]
//! builds the production wiring from a validated [`ContractForgeConfig`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use contract_forge_config::AuditSinkType;
use contract_forge_config::ContractForgeConfig;
use contract_forge_config::EmailProvider;
use contract_forge_config::GrammarMode;
use contract_forge_config::StoreType;
use contract_forge_core::ContractService;
use contract_forge_core::DocumentExporter;
use contract_forge_core::InMemoryContractStore;
use contract_forge_core::SharedContractStore;
use contract_forge_core::TemplateRegistry;
use contract_forge_core::Timestamp;
use contract_forge_export::ContractExporter;
use contract_forge_providers::BuiltinGrammarChecker;
use contract_forge_providers::DisabledEmailSender;
use contract_forge_providers::DisabledGrammarChecker;
use contract_forge_providers::EmailSender;
use contract_forge_providers::GrammarChecker;
use contract_forge_providers::LanguageToolChecker;
use contract_forge_providers::LanguageToolConfig;
use contract_forge_providers::SendGridConfig;
use contract_forge_providers::SendGridEmailSender;
use contract_forge_store_sqlite::SqliteContractStore;

use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::error::ServerError;
use crate::telemetry::Metrics;
use crate::telemetry::NoopMetrics;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bound on how far a client-supplied `issuedAt` may drift from now.
pub const DEFAULT_MAX_ISSUED_AT_SKEW_MS: u64 = 86_400_000;

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Preview, generation, and record access.
    pub service: ContractService,
    /// Document exporter.
    pub exporter: Arc<dyn DocumentExporter + Send + Sync>,
    /// Email sender.
    pub email: Arc<dyn EmailSender>,
    /// Grammar checker.
    pub grammar: Arc<dyn GrammarChecker>,
    /// Audit sink.
    pub audit: Arc<dyn AuditSink>,
    /// Metrics sink.
    pub metrics: Arc<dyn Metrics>,
    /// Maximum accepted distance between `issuedAt` and now.
    pub max_issued_at_skew_ms: u64,
    /// Wall clock.
    pub clock: fn() -> Timestamp,
}

impl AppState {
    /// Creates state around `service` with builtin grammar, disabled email,
    /// and no-op sinks.
    #[must_use]
    pub fn new(service: ContractService) -> Self {
        Self {
            service,
            exporter: Arc::new(ContractExporter::default()),
            email: Arc::new(DisabledEmailSender),
            grammar: Arc::new(BuiltinGrammarChecker),
            audit: Arc::new(NoopAuditSink),
            metrics: Arc::new(NoopMetrics),
            max_issued_at_skew_ms: DEFAULT_MAX_ISSUED_AT_SKEW_MS,
            clock: system_now,
        }
    }

    /// Replaces the email sender.
    #[must_use]
    pub fn with_email(mut self, email: Arc<dyn EmailSender>) -> Self {
        self.email = email;
        self
    }

    /// Replaces the grammar checker.
    #[must_use]
    pub fn with_grammar(mut self, grammar: Arc<dyn GrammarChecker>) -> Self {
        self.grammar = grammar;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Replaces the metrics sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replaces the wall clock.
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the `issuedAt` skew bound.
    #[must_use]
    pub const fn with_max_issued_at_skew_ms(mut self, max_issued_at_skew_ms: u64) -> Self {
        self.max_issued_at_skew_ms = max_issued_at_skew_ms;
        self
    }

    /// Returns the current instant.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        (self.clock)()
    }

    /// Builds production state from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Init`] when the store, a provider client, or
    /// the audit sink cannot be initialized.
    pub fn from_config(config: &ContractForgeConfig) -> Result<Self, ServerError> {
        let service = ContractService::new(
            TemplateRegistry::builtin(),
            config.engine_config(),
            build_store(config)?,
        );
        Ok(Self::new(service)
            .with_email(build_email(config)?)
            .with_grammar(build_grammar(config)?)
            .with_audit(build_audit(config)?)
            .with_max_issued_at_skew_ms(config.documents.max_issued_at_skew_ms))
    }
}

/// Reads the system clock.
fn system_now() -> Timestamp {
    Timestamp::from_system_time(SystemTime::now())
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds the contract store from configuration.
fn build_store(config: &ContractForgeConfig) -> Result<SharedContractStore, ServerError> {
    match config.store.store_type {
        StoreType::Memory => Ok(SharedContractStore::from_store(InMemoryContractStore::new())),
        StoreType::Sqlite => {
            let sqlite_config = config.store.sqlite_config().ok_or_else(|| {
                ServerError::Config("sqlite store requires path".to_string())
            })?;
            let store = SqliteContractStore::new(&sqlite_config)
                .map_err(|err| ServerError::Init(err.to_string()))?;
            Ok(SharedContractStore::from_store(store))
        }
    }
}

/// Builds the email sender from configuration.
fn build_email(config: &ContractForgeConfig) -> Result<Arc<dyn EmailSender>, ServerError> {
    match config.email.provider {
        EmailProvider::Disabled => Ok(Arc::new(DisabledEmailSender)),
        EmailProvider::Sendgrid => {
            let sender = SendGridEmailSender::new(SendGridConfig {
                endpoint: config.email.endpoint.clone(),
                from_address: config.email.from_address.trim().to_string(),
                api_key: config.email.api_key(),
                timeout_ms: config.email.timeout_ms,
            })
            .map_err(|err| ServerError::Init(err.to_string()))?;
            Ok(Arc::new(sender))
        }
    }
}

/// Builds the grammar checker from configuration.
///
/// # Errors
///
/// Returns [`ServerError::Init`] when the `LanguageTool` client cannot be
/// built.
pub fn build_grammar(
    config: &ContractForgeConfig,
) -> Result<Arc<dyn GrammarChecker>, ServerError> {
    match config.grammar.mode {
        GrammarMode::Builtin => Ok(Arc::new(BuiltinGrammarChecker)),
        GrammarMode::Disabled => Ok(Arc::new(DisabledGrammarChecker)),
        GrammarMode::LanguageTool => {
            let checker = LanguageToolChecker::new(LanguageToolConfig {
                endpoint: config.grammar.endpoint.clone(),
                language: config.grammar.language.clone(),
                timeout_ms: config.grammar.timeout_ms,
            })
            .map_err(|err| ServerError::Init(err.to_string()))?;
            Ok(Arc::new(checker))
        }
    }
}

/// Builds the audit sink from configuration.
fn build_audit(config: &ContractForgeConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    match config.audit.sink {
        AuditSinkType::Stderr => Ok(Arc::new(StderrAuditSink)),
        AuditSinkType::None => Ok(Arc::new(NoopAuditSink)),
        AuditSinkType::File => {
            let path = config.audit.path.as_deref().ok_or_else(|| {
                ServerError::Config("file audit sink requires audit.path".to_string())
            })?;
            let sink = FileAuditSink::new(Path::new(path))
                .map_err(|err| ServerError::Init(format!("audit log {path}: {err}")))?;
            Ok(Arc::new(sink))
        }
    }
}
