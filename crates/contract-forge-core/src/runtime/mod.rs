// crates/contract-forge-core/src/runtime/mod.rs
// ============================================================================
// Module: Contract Forge Runtime
// Description: Registry, validation, resolution, storage, and orchestration.
// Purpose: Execute the contract generation pipeline deterministically.
// Dependencies: crate::{catalog, core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime turns a contract type and form answers into a stored document:
//! look up the definition, validate every field, resolve the template, and
//! persist the result.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod engine;
pub mod fragments;
pub mod registry;
pub mod service;
pub mod store;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use engine::EngineConfig;
pub use engine::ResolutionEngine;
pub use engine::ResolveError;
pub use registry::RegistryDefect;
pub use registry::RegistryError;
pub use registry::TemplateRegistry;
pub use service::ContractService;
pub use service::GenerateRequest;
pub use service::ServiceError;
pub use store::InMemoryContractStore;
pub use store::SharedContractStore;
pub use validator::FieldError;
pub use validator::FieldErrorCode;
pub use validator::ValidationError;
pub use validator::is_valid_email;
pub use validator::validate_answers;
pub use validator::validate_field;
