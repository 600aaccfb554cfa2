// crates/contract-forge-core/src/runtime/service.rs
// ============================================================================
// Module: Contract Service
// Description: Orchestrates validation, resolution, and persistence.
// Purpose: Provide preview and generate operations over a registry and store.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Preview validates and resolves without persisting; generate additionally
//! stores the document and returns the stored record. The resolution engine
//! is never invoked when validation fails. Hosts supply both the issuing
//! instant and the creation instant so the service stays clock-free.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::ContractId;
use crate::core::ContractTypeId;
use crate::core::FormAnswers;
use crate::core::GeneratedContract;
use crate::core::NewContract;
use crate::core::Timestamp;
use crate::interfaces::ContractStore;
use crate::interfaces::StoreError;
use crate::runtime::engine::EngineConfig;
use crate::runtime::engine::ResolutionEngine;
use crate::runtime::engine::ResolveError;
use crate::runtime::registry::RegistryError;
use crate::runtime::registry::TemplateRegistry;
use crate::runtime::store::SharedContractStore;
use crate::runtime::validator::ValidationError;
use crate::runtime::validator::validate_answers;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requested contract type is not in the registry.
    #[error("unknown contract type: {0}")]
    UnknownContractType(String),
    /// One or more answers failed validation.
    #[error(transparent)]
    Validation(ValidationError),
    /// The document could not be resolved.
    #[error("resolution failed: {0}")]
    Resolve(String),
    /// Storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<RegistryError> for ServiceError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::NotFound(id) => Self::UnknownContractType(id),
        }
    }
}

impl From<ResolveError> for ServiceError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::UnknownContractType(id) => Self::UnknownContractType(id),
            ResolveError::InvalidInstant(message) => Self::Resolve(message),
        }
    }
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Preview or generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Contract type identifier.
    pub contract_type: ContractTypeId,
    /// Raw form answers.
    pub answers: FormAnswers,
    /// Instant rendered into the date stamp.
    pub issued_at: Timestamp,
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Contract generation service.
#[derive(Clone)]
pub struct ContractService {
    /// Resolution engine bound to the registry.
    engine: ResolutionEngine,
    /// Backing store.
    store: SharedContractStore,
}

impl ContractService {
    /// Creates a service over a registry and store.
    #[must_use]
    pub const fn new(
        registry: Arc<TemplateRegistry>,
        config: EngineConfig,
        store: SharedContractStore,
    ) -> Self {
        Self {
            engine: ResolutionEngine::new(registry, config),
            store,
        }
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        self.engine.registry()
    }

    /// Validates and resolves a document without storing it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] for unknown types, invalid answers, or
    /// unrenderable instants.
    pub fn preview(&self, request: &GenerateRequest) -> Result<String, ServiceError> {
        let definition = self.engine.registry().definition(request.contract_type.as_str())?;
        validate_answers(definition, &request.answers).map_err(ServiceError::Validation)?;
        Ok(self.engine.resolve_definition(definition, &request.answers, request.issued_at)?)
    }

    /// Validates, resolves, and stores a document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] for unknown types, invalid answers, or storage
    /// failures.
    pub fn generate(
        &self,
        request: GenerateRequest,
        created_at: Timestamp,
    ) -> Result<GeneratedContract, ServiceError> {
        let content = self.preview(&request)?;
        let new_contract = NewContract::new(
            request.contract_type,
            request.answers,
            content,
            request.issued_at,
            created_at,
        );
        Ok(self.store.create(new_contract)?)
    }

    /// Loads a stored contract.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when loading fails.
    pub fn get(&self, id: &ContractId) -> Result<Option<GeneratedContract>, ServiceError> {
        Ok(self.store.get(id)?)
    }

    /// Records a download; returns false for unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Store`] when the update fails.
    pub fn record_download(&self, id: &ContractId) -> Result<bool, ServiceError> {
        Ok(self.store.increment_download(id)?)
    }
}
