// crates/contract-forge-core/src/lib.rs
// ============================================================================
// Module: Contract Forge Core Library
// Description: Public API surface for the Contract Forge core.
// Purpose: Expose core types, interfaces, the catalog, and runtime helpers.
// Dependencies: crate::{catalog, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Contract Forge core maps a contract type and form answers to a fully
//! resolved legal document. It owns the template registry, the field
//! validator, and the resolution engine, and integrates with storage and
//! export backends through explicit interfaces. Resolution is synchronous,
//! pure, and deterministic for a given generation instant.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod catalog;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::ContractStore;
pub use interfaces::DocumentExporter;
pub use interfaces::ExportArtifact;
pub use interfaces::ExportError;
pub use interfaces::ExportFormat;
pub use interfaces::ExportRequest;
pub use interfaces::StoreError;
pub use runtime::ContractService;
pub use runtime::EngineConfig;
pub use runtime::FieldError;
pub use runtime::FieldErrorCode;
pub use runtime::GenerateRequest;
pub use runtime::InMemoryContractStore;
pub use runtime::RegistryDefect;
pub use runtime::RegistryError;
pub use runtime::ResolutionEngine;
pub use runtime::ResolveError;
pub use runtime::ServiceError;
pub use runtime::SharedContractStore;
pub use runtime::TemplateRegistry;
pub use runtime::ValidationError;
pub use runtime::is_valid_email;
pub use runtime::validate_answers;
pub use runtime::validate_field;
